//! Keyboard hotkeys.
//!
//! Actions can have many hotkeys bound to them, and hotkeys can be bound to at most one action.
//! On disk the one-to-many relation of actions to keys is easier for the user to edit, so the
//! reverse many-to-one map of keys to actions is built when loading.

use std::sync::Arc;
mod defaults;

/// Physical keys that may be bound. Names match the common `KeyA`/`Digit1` key code spelling.
#[derive(
    Hash, PartialEq, Eq, Clone, Copy, Debug, strum::AsRefStr, strum::EnumString, strum::EnumIter,
)]
#[rustfmt::skip]
pub enum Key {
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
    KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    BracketLeft, BracketRight, Space, Enter, Escape, Backspace, Delete,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug, Copy)]
pub struct KeyboardHotkey {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub key: Key,
}
impl serde::Serialize for KeyboardHotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Strings keep the file human-editable.
        serializer.serialize_str(&self.to_string())
    }
}
impl<'de> serde::Deserialize<'de> for KeyboardHotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let str =
            <std::borrow::Cow<'de, str> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        str.parse().map_err(serde::de::Error::custom)
    }
}
impl KeyboardHotkey {
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            key,
        }
    }
    #[must_use]
    pub const fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }
    #[must_use]
    pub const fn ctrl_shift(key: Key) -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::new(key)
        }
    }
}
/// Formats as `[ctrl+][alt+][shift+]<key name>`, the same syntax [`std::str::FromStr`] accepts.
impl std::fmt::Display for KeyboardHotkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut components = smallvec::SmallVec::<[&str; 4]>::new();
        if self.ctrl {
            components.push("ctrl");
        }
        if self.alt {
            components.push("alt");
        }
        if self.shift {
            components.push("shift");
        }
        components.push(self.key.as_ref());
        f.write_str(&components.join("+"))
    }
}
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyboardHotkeyFromStrError {
    #[error("unrecognized key name")]
    InvalidKeyName,
}
/// Parse from syntax `[ctrl+][alt+][shift+]<key name>`, case-sensitive.
impl std::str::FromStr for KeyboardHotkey {
    type Err = KeyboardHotkeyFromStrError;
    fn from_str(mut str: &str) -> Result<Self, Self::Err> {
        let mut take_if_has = |prefix: &str| -> bool {
            if let Some(new_str) = str.strip_prefix(prefix) {
                str = new_str;
                true
            } else {
                false
            }
        };
        let ctrl = take_if_has("ctrl+");
        let alt = take_if_has("alt+");
        let shift = take_if_has("shift+");
        let key = str
            .parse()
            .map_err(|_| KeyboardHotkeyFromStrError::InvalidKeyName)?;

        Ok(Self {
            ctrl,
            alt,
            shift,
            key,
        })
    }
}

/// Maps each action onto potentially many hotkeys.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct ActionsToKeys(hashbrown::HashMap<super::Action, Arc<[KeyboardHotkey]>>);
impl Default for ActionsToKeys {
    fn default() -> Self {
        let keys_map = defaults::KEYBOARD
            .iter()
            .map(|(action, keys)| (*action, Arc::from(*keys)))
            .collect();

        let new = Self(keys_map);
        debug_assert!(TryInto::<KeysToActions>::try_into(&new).is_ok());
        new
    }
}
impl ActionsToKeys {
    /// Hotkeys bound to this action. Empty if none.
    #[must_use]
    pub fn keys_of(&self, action: super::Action) -> &[KeyboardHotkey] {
        self.0.get(&action).map(|keys| &keys[..]).unwrap_or(&[])
    }
}

/// Derived from [`ActionsToKeys`], maps each hotkey onto at most one action.
#[derive(Debug)]
pub struct KeysToActions(hashbrown::HashMap<KeyboardHotkey, super::Action>);
#[derive(thiserror::Error, Debug)]
pub enum KeysToActionsError {
    /// A single key was bound to multiple actions.
    /// Only the first two encountered (in arbitrary order) are reported.
    #[error("hotkey {key} used for more than one action: {actions:?}")]
    DuplicateBinding {
        key: KeyboardHotkey,
        actions: [super::Action; 2],
    },
}
impl TryFrom<&ActionsToKeys> for KeysToActions {
    type Error = KeysToActionsError;
    fn try_from(value: &ActionsToKeys) -> Result<Self, Self::Error> {
        let mut new = KeysToActions(hashbrown::HashMap::default());

        for (action, keys) in &value.0 {
            for key in keys.iter() {
                if let Some(old) = new.0.insert(*key, *action) {
                    return Err(KeysToActionsError::DuplicateBinding {
                        key: *key,
                        actions: [*action, old],
                    });
                }
            }
        }

        Ok(new)
    }
}
impl KeysToActions {
    #[must_use]
    pub fn action_of(&self, key: &KeyboardHotkey) -> Option<super::Action> {
        self.0.get(key).copied()
    }
}

#[cfg(test)]
mod test {
    use super::{ActionsToKeys, Key, KeyboardHotkey, KeysToActions, KeysToActionsError};
    use crate::actions::Action;
    #[test]
    fn parse_and_format() {
        let hotkey: KeyboardHotkey = "ctrl+shift+KeyZ".parse().unwrap();
        assert_eq!(hotkey, KeyboardHotkey::ctrl_shift(Key::KeyZ));
        assert_eq!(hotkey.to_string(), "ctrl+shift+KeyZ");
        assert_eq!(
            "Digit1".parse::<KeyboardHotkey>().unwrap(),
            KeyboardHotkey::new(Key::Digit1)
        );
        // Modifiers are only recognized in canonical order.
        assert!("shift+ctrl+KeyZ".parse::<KeyboardHotkey>().is_err());
        assert!("ctrl+keyz".parse::<KeyboardHotkey>().is_err());
    }
    #[test]
    fn defaults_resolve() {
        let defaults = ActionsToKeys::default();
        let reverse = KeysToActions::try_from(&defaults).unwrap();
        assert_eq!(
            reverse.action_of(&KeyboardHotkey::ctrl(Key::KeyZ)),
            Some(Action::Undo)
        );
        assert_eq!(
            reverse.action_of(&KeyboardHotkey::ctrl_shift(Key::KeyZ)),
            Some(Action::Redo)
        );
        assert_eq!(reverse.action_of(&KeyboardHotkey::new(Key::KeyQ)), None);
        assert!(!defaults.keys_of(Action::Save).is_empty());
    }
    #[test]
    fn duplicate_bindings_rejected() {
        let toml = r#"
            Undo = ["ctrl+KeyZ"]
            Redo = ["ctrl+KeyZ"]
        "#;
        let mapping: ActionsToKeys = toml::from_str(toml).unwrap();
        assert!(matches!(
            KeysToActions::try_from(&mapping),
            Err(KeysToActionsError::DuplicateBinding { .. })
        ));
    }
    #[test]
    fn toml_roundtrip_keeps_bindings() {
        let defaults = ActionsToKeys::default();
        let text = toml::to_string_pretty(&defaults).unwrap();
        let back: ActionsToKeys = toml::from_str(&text).unwrap();
        assert_eq!(back.keys_of(Action::Redo), defaults.keys_of(Action::Redo));
    }
}
