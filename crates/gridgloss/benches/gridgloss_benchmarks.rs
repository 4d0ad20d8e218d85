use std::io::Write;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use gridgloss::{
    Border, BoxRegions, Color, ColorProfile, ColorWriter, ConcreteColor, Grid, Position, Rect,
    Renderer, RgbColor, Sides, Style, TerminalColor, compose, join_horizontal, place, wrap,
};

const SAMPLE_LINE: &str = "The quick brown fox jumps over the lazy dog.";
const SAMPLE_PARAGRAPH: &str =
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt.";

fn card() -> Style {
    Style::new()
        .foreground_color(RgbColor::new(255, 0, 0))
        .background_color(RgbColor::new(0, 0, 255))
        .bold()
        .padding((1u16, 2u16))
        .margin(1u16)
        .border(Border::rounded())
        .align(Position::Center)
}

fn bench_colors(c: &mut Criterion) {
    let mut group = c.benchmark_group("gridgloss/colors");

    group.bench_function("Color::resolve/truecolor", |b| {
        let color = Color::from("#FF8040");
        b.iter(|| black_box(color.resolve(ColorProfile::TrueColor, true)));
    });

    group.bench_function("Color::resolve/ansi", |b| {
        let color = Color::from("#FF8040");
        b.iter(|| black_box(color.resolve(ColorProfile::Ansi, true)));
    });

    group.bench_function("ColorProfile::convert/ansi256", |b| {
        let color = ConcreteColor::Rgb(RgbColor::new(12, 200, 99));
        b.iter(|| black_box(ColorProfile::Ansi256.convert(black_box(color))));
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("gridgloss/render");
    let renderer = Renderer::new();

    group.throughput(Throughput::Bytes(SAMPLE_LINE.len() as u64));
    group.bench_function("plain_attrs", |b| {
        let style = Style::new().bold().foreground("#ff00ff");
        b.iter(|| black_box(style.render_with(&renderer, SAMPLE_LINE)));
    });

    group.bench_function("bordered_card", |b| {
        let style = card();
        b.iter(|| black_box(style.render_with(&renderer, SAMPLE_LINE)));
    });

    group.throughput(Throughput::Bytes(SAMPLE_PARAGRAPH.len() as u64));
    group.bench_function("wrapped_card", |b| {
        let style = card().width(30);
        b.iter(|| black_box(style.render_with(&renderer, SAMPLE_PARAGRAPH)));
    });

    group.bench_function("compose_large_box", |b| {
        let style = card().width(200).height(60);
        b.iter(|| black_box(compose(&style, &renderer, SAMPLE_PARAGRAPH)));
    });

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("gridgloss/layout");

    group.bench_function("BoxRegions::compute", |b| {
        b.iter(|| {
            black_box(BoxRegions::compute(
                Rect::new(0, 0, 120, 40),
                Sides::new(1, 2, 1, 2),
                Sides::new(1, 1, 1, 1),
                Sides::new(2, 4, 2, 4),
            ))
        });
    });

    group.bench_function("Grid::render/120x40", |b| {
        let grid = Grid::new(120, 40);
        b.iter(|| black_box(grid.render()));
    });

    group.bench_function("wrap/paragraph", |b| {
        b.iter(|| black_box(wrap(black_box(SAMPLE_PARAGRAPH), 20)));
    });

    group.bench_function("place/center", |b| {
        b.iter(|| {
            black_box(place(
                80,
                24,
                Position::Center,
                Position::Center,
                SAMPLE_LINE,
            ))
        });
    });

    group.bench_function("join_horizontal/three_cards", |b| {
        let rendered = card().render_with(&Renderer::new(), "card");
        b.iter(|| {
            black_box(join_horizontal(
                Position::Top,
                &[&rendered, &rendered, &rendered],
            ))
        });
    });

    group.finish();
}

fn bench_writer(c: &mut Criterion) {
    let mut group = c.benchmark_group("gridgloss/writer");
    let output = card()
        .width(60)
        .render_with(&Renderer::new(), SAMPLE_PARAGRAPH);
    group.throughput(Throughput::Bytes(output.len() as u64));

    for profile in [ColorProfile::TrueColor, ColorProfile::Ansi, ColorProfile::Ascii] {
        group.bench_function(format!("{profile:?}"), |b| {
            b.iter(|| {
                let mut w = ColorWriter::new(Vec::with_capacity(output.len()), profile);
                let _ = w.write_all(output.as_bytes());
                black_box(w.get_ref().len())
            });
        });
    }

    group.finish();
}

criterion_group!(
    gridgloss_benches,
    bench_colors,
    bench_rendering,
    bench_layout,
    bench_writer
);
criterion_main!(gridgloss_benches);
