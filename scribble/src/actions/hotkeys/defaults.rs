use super::super::Action;
use super::{Key, KeyboardHotkey};

pub const KEYBOARD: &[(Action, &[KeyboardHotkey])] = &[
    (Action::Undo, &[KeyboardHotkey::ctrl(Key::KeyZ)]),
    (
        Action::Redo,
        &[
            KeyboardHotkey::ctrl(Key::KeyY),
            KeyboardHotkey::ctrl_shift(Key::KeyZ),
        ],
    ),
    (Action::BrushSmall, &[KeyboardHotkey::new(Key::Digit1)]),
    (Action::BrushMedium, &[KeyboardHotkey::new(Key::Digit2)]),
    (Action::BrushLarge, &[KeyboardHotkey::new(Key::Digit3)]),
    (Action::Clear, &[KeyboardHotkey::ctrl(Key::Delete)]),
    (Action::Save, &[KeyboardHotkey::ctrl(Key::KeyS)]),
];
