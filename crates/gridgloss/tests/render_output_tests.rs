//! End-to-end rendering through the public API.

use std::sync::Arc;

use gridgloss::{
    AdaptiveColor, Border, Color, ColorProfile, Grid, Position, Rect, Renderer, Style, Whitespace,
    compose, height, join_horizontal, join_vertical, place, place_horizontal,
    place_horizontal_with, place_overlay, place_vertical, width,
};

fn renderer(profile: ColorProfile) -> Renderer {
    Renderer::new().with_color_profile(profile)
}

fn ascii() -> Renderer {
    renderer(ColorProfile::Ascii)
}

// ===========================================================================
// Documented scenarios
// ===========================================================================

#[test]
fn measures_width_and_height() {
    assert_eq!(width("Hello"), 5);
    assert_eq!(height("a\nb\nc"), 3);
}

#[test]
fn normal_border_around_hello() {
    let out = Style::new()
        .border(Border::normal())
        .render_with(&ascii(), "Hello");
    assert_eq!(out, "┌─────┐\n│Hello│\n└─────┘");
}

#[test]
fn place_horizontal_right_and_center() {
    assert_eq!(place_horizontal(10, Position::Right, "Hello"), "     Hello");
    assert_eq!(place_horizontal(10, Position::Center, "Hello"), "  Hello   ");
}

#[test]
fn fixed_box_is_filled_with_spaces() {
    let out = Style::new().width(7).height(3).render_with(&ascii(), "");
    assert_eq!(out, "       \n       \n       ");
}

// ===========================================================================
// SGR output
// ===========================================================================

#[test]
fn truecolor_foreground_and_bold() {
    let out = Style::new()
        .bold()
        .foreground("#ff0000")
        .render_with(&renderer(ColorProfile::TrueColor), "hi");
    assert_eq!(out, "\x1b[1;38;2;255;0;0mhi\x1b[0m");
}

#[test]
fn colors_downgrade_with_the_profile() {
    let style = Style::new().foreground("#ff0000");
    assert_eq!(
        style.render_with(&renderer(ColorProfile::Ansi256), "x"),
        "\x1b[38;5;196mx\x1b[0m"
    );
    assert_eq!(
        style.render_with(&renderer(ColorProfile::Ansi), "x"),
        "\x1b[91mx\x1b[0m"
    );
    assert_eq!(style.render_with(&ascii(), "x"), "x");
}

#[test]
fn padding_shares_the_background() {
    let out = Style::new()
        .background("4")
        .padding((0, 1))
        .render_with(&renderer(ColorProfile::TrueColor), "hi");
    assert_eq!(out, "\x1b[44m hi \x1b[0m");
}

#[test]
fn strikethrough_skips_spaces_by_default() {
    let out = Style::new()
        .strikethrough()
        .render_with(&renderer(ColorProfile::Ansi), "a b");
    assert_eq!(out, "\x1b[9ma\x1b[0m \x1b[9mb\x1b[0m");
}

#[test]
fn underline_covers_spaces_by_default() {
    let out = Style::new()
        .underline()
        .render_with(&renderer(ColorProfile::Ansi), "a b");
    assert_eq!(out, "\x1b[4ma b\x1b[0m");
}

#[test]
fn adaptive_colors_follow_the_background() {
    let style = Style::new().foreground_color(AdaptiveColor {
        light: Color::from("1"),
        dark: Color::from("2"),
    });
    let dark = renderer(ColorProfile::Ansi);
    let light = dark.with_dark_background(false);
    assert_eq!(style.render_with(&dark, "x"), "\x1b[32mx\x1b[0m");
    assert_eq!(style.render_with(&light, "x"), "\x1b[31mx\x1b[0m");
}

#[test]
fn attached_renderer_is_used_by_render() {
    let style = Style::new()
        .foreground("#ff0000")
        .renderer(Arc::new(renderer(ColorProfile::Ansi)));
    assert_eq!(style.render("x"), "\x1b[91mx\x1b[0m");
}

// ===========================================================================
// Layout
// ===========================================================================

#[test]
fn centered_text_in_rounded_box() {
    let out = Style::new()
        .width(9)
        .height(5)
        .align(Position::Center)
        .align_vertical(Position::Center)
        .border(Border::rounded())
        .render_with(&ascii(), "ab");
    let expected = [
        "╭───────╮",
        "│       │",
        "│  ab   │",
        "│       │",
        "╰───────╯",
    ]
    .join("\n");
    assert_eq!(out, expected);
}

#[test]
fn long_text_wraps_inside_the_border() {
    let out = Style::new()
        .width(7)
        .border(Border::ascii())
        .render_with(&ascii(), "one two three");
    let expected = ["+-----+", "|one  |", "|two  |", "|three|", "+-----+"].join("\n");
    assert_eq!(out, expected);
}

#[test]
fn margins_surround_the_border() {
    let out = Style::new()
        .border(Border::normal())
        .margin((1, 2))
        .margin_char('.')
        .render_with(&ascii(), "x");
    let expected = [".......", "..┌─┐..", "..│x│..", "..└─┘..", "......."].join("\n");
    assert_eq!(out, expected);
}

#[test]
fn tabs_expand_to_tab_width() {
    let out = Style::new().tab_width(2).bold().render_with(&ascii(), "a\tb");
    assert_eq!(out, "a  b");
    let removed = Style::new().tab_width(0).bold().render_with(&ascii(), "a\tb");
    assert_eq!(removed, "ab");
}

#[test]
fn transform_runs_before_layout() {
    let out = Style::new()
        .transform(|s: &str| s.to_uppercase())
        .border(Border::normal())
        .render_with(&ascii(), "ab");
    assert_eq!(out, "┌──┐\n│AB│\n└──┘");
}

#[test]
fn stored_string_renders_through_display() {
    let style = Style::new()
        .set_string("hi")
        .renderer(Arc::new(ascii()))
        .border(Border::normal());
    assert_eq!(style.to_string(), "┌──┐\n│hi│\n└──┘");
}

#[test]
fn compose_exposes_the_cell_grid() {
    let grid = compose(
        &Style::new().border(Border::normal()).padding((0, 1)),
        &ascii(),
        "a",
    );
    assert_eq!((grid.width(), grid.height()), (5, 3));
    let middle: String = grid
        .row(1)
        .unwrap_or_default()
        .iter()
        .map(|c| c.content.as_str())
        .collect();
    assert_eq!(middle, "│ a │");
}

#[test]
fn draw_paints_into_a_shared_grid() {
    let mut grid = Grid::new(12, 3);
    let left = Style::new().set_string("L").border(Border::normal());
    let right = Style::new().set_string("R").border(Border::ascii());
    left.draw(&mut grid, Rect::new(0, 0, 3, 3), &ascii());
    right.draw(&mut grid, Rect::new(9, 0, 3, 3), &ascii());
    assert_eq!(
        grid.render(),
        "┌─┐      +-+\n│L│      |R|\n└─┘      +-+"
    );
}

// ===========================================================================
// Placement and joins
// ===========================================================================

#[test]
fn place_in_both_axes() {
    assert_eq!(
        place(5, 3, Position::Center, Position::Center, "x"),
        "     \n  x  \n     "
    );
    assert_eq!(place_vertical(3, Position::Bottom, "ab"), "  \n  \nab");
}

#[test]
fn placement_fill_characters() {
    let ws = Whitespace::new().chars("-=");
    assert_eq!(
        place_horizontal_with(7, Position::Right, "ab", &ws),
        "-=-=-ab"
    );
}

#[test]
fn overlay_stamps_foreground() {
    let bg = "......\n......\n......";
    assert_eq!(place_overlay(2, 1, "ab", bg), "......\n..ab..\n......");
}

#[test]
fn joined_boxes() {
    let a = Style::new().border(Border::normal()).render_with(&ascii(), "a\nb");
    let b = Style::new().border(Border::normal()).render_with(&ascii(), "c");
    let row = join_horizontal(Position::Top, &[&a, &b]);
    assert_eq!(row, "┌─┐┌─┐\n│a││c│\n│b│└─┘\n└─┘   ");
    let column = join_vertical(Position::Center, &["ab", &b]);
    assert_eq!(column, "ab \n┌─┐\n│c│\n└─┘");
}
