use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use subclean::pipeline::{
    HallucinationMarkers, LongSegmentSplitter, Pipeline, PipelineConfig, Segment, SpeakerSegment,
};
use subclean::srt::SubtitleWriter;

const PHRASES: &[&str] = &[
    "- Привет, как у тебя дела сегодня.",
    "хорошо",
    "Мы долго шли по дороге, и никто не знал, куда она ведёт, а потом начался сильный дождь и мы спрятались под мостом.",
    "Субтитры сделал DimaTorzok",
    "да да да да да да",
    "Эй, ты!",
    "Эй, ты!",
    "Эй, ты!",
    "Эй, ты!",
    "Эй, ты!",
    "за помощь",
];

/// A transcript of `count` segments cycling through typical recognizer output
fn synthetic_transcript(count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| {
            let start = i as f64 * 1.5;
            Segment::new(start, start + 1.2, PHRASES[i % PHRASES.len()])
                .with_no_speech_prob((i % 7) as f64 / 10.0)
        })
        .collect()
}

fn synthetic_speakers(count: usize) -> Vec<SpeakerSegment> {
    (0..count / 4 + 1)
        .map(|i| {
            let start = i as f64 * 6.0;
            SpeakerSegment::new(start, start + 6.0, format!("SPEAKER_{:02}", i % 3))
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let pipeline = Pipeline::new(
        PipelineConfig::default(),
        HallucinationMarkers::new(["Субтитры сделал DimaTorzok"]),
    );

    let mut group = c.benchmark_group("pipeline");
    for count in [100usize, 1_000, 10_000] {
        let segments = synthetic_transcript(count);
        let speakers = synthetic_speakers(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &segments, |b, segments| {
            b.iter(|| {
                pipeline
                    .run(black_box(segments.clone()), Some(speakers.as_slice()))
                    .unwrap()
            });
        });
    }
    group.finish();

    let splitter = LongSegmentSplitter::default();
    let long = Segment::new(0.0, 30.0, PHRASES[2].repeat(8));
    c.bench_function("split_long_cue", |b| {
        b.iter(|| splitter.split_segment(black_box(long.clone())))
    });

    let cues = pipeline
        .run(synthetic_transcript(1_000), None)
        .map(|output| output.segments)
        .unwrap_or_default();
    let writer = SubtitleWriter::default();
    c.bench_function("render_srt_1000", |b| b.iter(|| writer.render(black_box(&cues))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
