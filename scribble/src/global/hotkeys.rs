use crate::actions::{
    self,
    hotkeys::{ActionsToKeys, KeyboardHotkey, KeysToActions},
};

const DOCUMENTATION: &str = r#"# Scribble hotkeys. You may edit this file, but be aware that formatting and comments will not
# be preserved, and all keys and values are case sensitive.

# See `actions::Action` for available actions, specified here as keys.
# Hotkeys are written `[ctrl+][alt+][shift+]<key code>`, such as `ctrl+KeyZ` or `Digit1`.
# Each action may have many hotkeys associated with it, but each hotkey should only be used at most once.

# Examples:
# Undo = ["ctrl+KeyZ"]
# Redo = ["ctrl+KeyY", "ctrl+shift+KeyZ"]

"#;

pub struct Hotkeys {
    failed_to_load: bool,
    pub actions_to_keys: ActionsToKeys,
    pub keys_to_actions: KeysToActions,
}
impl Hotkeys {
    const FILENAME: &'static str = "hotkeys.toml";
    /// Shared global hotkeys, saved and loaded from user preferences.
    /// (Or defaulted, if unavailable for some reason)
    #[must_use]
    pub fn get() -> &'static Self {
        static GLOBAL_HOTKEYS: std::sync::OnceLock<Hotkeys> = std::sync::OnceLock::new();

        GLOBAL_HOTKEYS.get_or_init(|| match super::preferences_dir() {
            None => Self::no_path(),
            Some(mut dir) => {
                dir.push(Self::FILENAME);
                Self::load_or_default(&dir)
            }
        })
    }
    #[must_use]
    pub fn no_path() -> Self {
        log::warn!("Hotkeys weren't available, defaulting.");
        Self::defaulted()
    }
    fn defaulted() -> Self {
        let default = ActionsToKeys::default();
        // Default action map is reversible - this is asserted by the default impl when debugging.
        let reverse = match (&default).try_into() {
            Ok(reverse) => reverse,
            Err(e) => panic!("default hotkeys are inconsistent: {e}"),
        };

        Self {
            failed_to_load: true,
            keys_to_actions: reverse,
            actions_to_keys: default,
        }
    }
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        let mappings: anyhow::Result<(ActionsToKeys, KeysToActions)> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            let actions_to_keys : ActionsToKeys = toml::from_str(&string)?;
            let keys_to_actions : KeysToActions = (&actions_to_keys).try_into()?;

            Ok((actions_to_keys,keys_to_actions))
        };

        match mappings {
            Ok((actions_to_keys, keys_to_actions)) => Self {
                failed_to_load: false,
                actions_to_keys,
                keys_to_actions,
            },
            Err(e) => {
                log::info!("Hotkeys at {} not loaded ({e:#}), defaulting.", path.display());
                Self::defaulted()
            }
        }
    }
    /// Return true if loading user's settings failed. This can be useful for
    /// displaying a warning.
    #[must_use]
    pub fn did_fail_to_load(&self) -> bool {
        self.failed_to_load
    }
    #[must_use]
    pub fn action_of(&self, key: &KeyboardHotkey) -> Option<actions::Action> {
        self.keys_to_actions.action_of(key)
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let string = toml::ser::to_string_pretty(&self.actions_to_keys)?;
        super::write_preference(Self::FILENAME, DOCUMENTATION, &string)?;
        Ok(())
    }
}
