//! # Scripts
//!
//! A line-oriented text format that stands in for a finger and a toolbar, so drawings can be
//! produced without a touch screen.
//!
//! ```text
//! # A red squiggle, then a thin black dot.
//! down 10 10
//! move 40 25
//! move 80 10
//! up
//! brush small
//! color black
//! down 50 50
//! up
//! save
//! ```
//!
//! Blank lines are ignored, as are comments: lines starting with `#`, and anything after a
//! `#` that stands alone as a word.

use scribble_core::{palette::SwatchIndex, BrushSize, Color, Point, PointerEvent};

use crate::{
    actions::{hotkeys::KeyboardHotkey, Action},
    app::App,
    global::hotkeys::Hotkeys,
    permissions::PermissionGate,
    share::ShareTarget,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Preset(BrushSize),
    Dp(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Pointer(PointerEvent),
    Action(Action),
    Color(Color),
    Swatch(SwatchIndex),
    Brush(Brush),
    Key(KeyboardHotkey),
    Background(std::path::PathBuf),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: expected {expected}")]
    BadArguments { line: usize, expected: &'static str },
    #[error("line {line}: {source}")]
    Color {
        line: usize,
        source: scribble_core::color::ColorParseError,
    },
    #[error("line {line}: {source}")]
    Key {
        line: usize,
        source: crate::actions::hotkeys::KeyboardHotkeyFromStrError,
    },
}

/// Parse a whole script. Stops at the first bad line.
pub fn parse(text: &str) -> Result<Vec<Command>, ScriptError> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line).transpose())
        .collect()
}

/// Remove a comment: a line starting with `#`, or a `#` that stands alone as a word.
/// `#` glued to a word is data, as in `color #FF0000`.
fn strip_comment(text: &str) -> &str {
    if text.trim_start().starts_with('#') {
        return "";
    }
    let bytes = text.as_bytes();
    let comment_start = text.match_indices('#').map(|(idx, _)| idx).find(|&idx| {
        let after = bytes.get(idx + 1);
        idx > 0 && bytes[idx - 1].is_ascii_whitespace() && after.map_or(true, u8::is_ascii_whitespace)
    });
    comment_start.map_or(text, |idx| &text[..idx])
}

/// Parse one line. `Ok(None)` for blank and comment-only lines.
fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let text = strip_comment(text).trim();
    let Some((command, rest)) = text
        .split_once(char::is_whitespace)
        .map(|(command, rest)| (command, rest.trim()))
        .or((!text.is_empty()).then_some((text, "")))
    else {
        return Ok(None);
    };
    let bad = |expected| ScriptError::BadArguments { line, expected };
    let no_args = |command| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(bad("no arguments"))
        }
    };
    let point = || -> Result<Point, ScriptError> {
        let mut parts = rest.split_whitespace();
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(bad("two coordinates"));
        };
        let x: f32 = x.parse().map_err(|_| bad("two coordinates"))?;
        let y: f32 = y.parse().map_err(|_| bad("two coordinates"))?;
        Point::new(x, y).map_err(|_| bad("finite coordinates"))
    };

    let parsed = match command.to_ascii_lowercase().as_str() {
        "down" => Command::Pointer(PointerEvent::Down(point()?)),
        "move" => Command::Pointer(PointerEvent::Move(point()?)),
        "up" => no_args(Command::Pointer(PointerEvent::Up))?,
        "undo" => no_args(Command::Action(Action::Undo))?,
        "redo" => no_args(Command::Action(Action::Redo))?,
        "clear" => no_args(Command::Action(Action::Clear))?,
        "save" => no_args(Command::Action(Action::Save))?,
        "color" => Command::Color(
            Color::parse(rest).map_err(|source| ScriptError::Color { line, source })?,
        ),
        "swatch" => Command::Swatch(SwatchIndex(
            rest.parse().map_err(|_| bad("a swatch index"))?,
        )),
        "brush" => {
            if let Ok(size) = rest.parse::<BrushSize>() {
                Command::Brush(Brush::Preset(size))
            } else {
                let dp: f32 = rest
                    .parse()
                    .map_err(|_| bad("small, medium, large, or a width in dp"))?;
                Command::Brush(Brush::Dp(dp))
            }
        }
        "key" => Command::Key(
            rest.parse()
                .map_err(|source| ScriptError::Key { line, source })?,
        ),
        "background" => {
            if rest.is_empty() {
                return Err(bad("a path"));
            }
            Command::Background(rest.into())
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.to_owned(),
            })
        }
    };
    Ok(Some(parsed))
}

/// Feed commands to the app, in order.
pub fn run<Gate: PermissionGate, Share: ShareTarget>(
    app: &mut App<Gate, Share>,
    hotkeys: &Hotkeys,
    commands: impl IntoIterator<Item = Command>,
) {
    for command in commands {
        match command {
            Command::Pointer(event) => app.pointer(event),
            Command::Action(action) => app.perform(action),
            Command::Color(color) => app.set_color(color),
            Command::Swatch(index) => app.select_swatch(index),
            Command::Brush(Brush::Preset(size)) => app.set_brush(size),
            Command::Brush(Brush::Dp(dp)) => {
                if let Err(e) = app.set_brush_dp(dp) {
                    log::warn!("ignoring brush width {dp}: {e}");
                }
            }
            Command::Key(key) => {
                app.hotkey(hotkeys, &key);
            }
            Command::Background(path) => app.import_background(&path),
        }
        // Deliver whatever finished meanwhile, like an event loop would between events.
        app.pump();
    }
}

#[cfg(test)]
mod test {
    use super::{parse, Brush, Command, ScriptError};
    use crate::{
        actions::{
            hotkeys::{Key, KeyboardHotkey},
            Action,
        },
        app::App,
        global::{hotkeys::Hotkeys, settings::Settings},
        permissions::StaticGate,
        share::LogShare,
    };
    use scribble_core::{palette::SwatchIndex, BrushSize, Color, Point, PointerEvent};

    #[test]
    fn parses_every_command() {
        let script = "
            # comment
            down 1 2.5
            move 3 4   # trailing comment
            UP
            undo
            redo
            clear
            save
            color #00FF00
            color navy
            swatch 3
            brush Large
            brush 12.5
            key ctrl+KeyZ
            background pictures/cat.png
        ";
        let commands = parse(script).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Pointer(PointerEvent::Down(Point { x: 1.0, y: 2.5 })),
                Command::Pointer(PointerEvent::Move(Point { x: 3.0, y: 4.0 })),
                Command::Pointer(PointerEvent::Up),
                Command::Action(Action::Undo),
                Command::Action(Action::Redo),
                Command::Action(Action::Clear),
                Command::Action(Action::Save),
                Command::Color(Color::GREEN),
                Command::Color(Color::from_rgb(0, 0, 0x80)),
                Command::Swatch(SwatchIndex(3)),
                Command::Brush(Brush::Preset(BrushSize::Large)),
                Command::Brush(Brush::Dp(12.5)),
                Command::Key(KeyboardHotkey::ctrl(Key::KeyZ)),
                Command::Background("pictures/cat.png".into()),
            ]
        );
    }
    #[test]
    fn comments() {
        assert_eq!(super::strip_comment("# whole line"), "");
        assert_eq!(super::strip_comment("   #indented"), "");
        assert_eq!(super::strip_comment("undo # why"), "undo ");
        assert_eq!(super::strip_comment("undo #"), "undo ");
        assert_eq!(super::strip_comment("color #FF0000"), "color #FF0000");
        assert_eq!(
            super::strip_comment("color #FF0000 # red"),
            "color #FF0000 "
        );
    }
    #[test]
    fn errors_carry_line_numbers() {
        assert_eq!(
            parse("down 1 1\nwiggle\n"),
            Err(ScriptError::UnknownCommand {
                line: 2,
                command: "wiggle".to_owned()
            })
        );
        assert!(matches!(
            parse("\n\ndown 1"),
            Err(ScriptError::BadArguments { line: 3, .. })
        ));
        assert!(matches!(
            parse("down 1 2 3"),
            Err(ScriptError::BadArguments { line: 1, .. })
        ));
        assert!(matches!(
            parse("down nan 2"),
            Err(ScriptError::BadArguments { line: 1, .. })
        ));
        assert!(matches!(
            parse("up now"),
            Err(ScriptError::BadArguments { line: 1, .. })
        ));
        assert!(matches!(
            parse("color #12"),
            Err(ScriptError::Color { line: 1, .. })
        ));
        assert!(matches!(
            parse("key ctrl+Banana"),
            Err(ScriptError::Key { line: 1, .. })
        ));
        assert!(matches!(
            parse("brush huge"),
            Err(ScriptError::BadArguments { line: 1, .. })
        ));
    }
    #[test]
    fn run_draws() {
        let settings = Settings {
            width: 16,
            height: 16,
            ..Settings::default()
        };
        let mut app = App::new(&settings, StaticGate::deny_all(), LogShare::default());
        let commands = parse(
            "
            brush 4
            down 2 2
            move 12 12
            up
            color blue
            down 2 12
            up
            key ctrl+KeyZ
            brush -3
            ",
        )
        .unwrap();
        super::run(&mut app, &Hotkeys::no_path(), commands);
        let committed = app.canvas().committed();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].thickness().get(), 4.0);
        assert_eq!(committed[0].color(), Color::RED);
        // The invalid width was ignored.
        assert_eq!(app.canvas().thickness().get(), 4.0);
        assert_eq!(app.canvas().color(), Color::BLUE);
        assert_eq!(app.canvas().redo_stack().len(), 1);
    }
}
