//! Storage permission checks.
//!
//! The host platform decides whether the app may read or write shared storage. The app only
//! asks through [`PermissionGate`], so a real platform dialog and the headless [`StaticGate`]
//! are interchangeable.

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum::AsRefStr, strum::EnumIter)]
pub enum Permission {
    ReadStorage,
    WriteStorage,
}

pub trait PermissionGate {
    /// Whether the permission is currently held, without prompting.
    fn is_granted(&self, permission: Permission) -> bool;
    /// Whether the user has denied this before, and should be told why it's needed
    /// instead of being prompted again.
    fn should_show_rationale(&self, permission: Permission) -> bool;
    /// Prompt for the permissions, returning the user's answer for each, in order.
    fn request(&mut self, permissions: &[Permission]) -> Vec<(Permission, bool)>;
}

/// A gate with fixed answers. Requesting a permission grants it only if it is `grantable`.
#[derive(Clone, Debug, Default)]
pub struct StaticGate {
    granted: hashbrown::HashSet<Permission>,
    grantable: hashbrown::HashSet<Permission>,
    denied_before: hashbrown::HashSet<Permission>,
}
impl StaticGate {
    /// Everything already granted.
    #[must_use]
    pub fn allow_all() -> Self {
        use strum::IntoEnumIterator;
        let all: hashbrown::HashSet<_> = Permission::iter().collect();
        Self {
            granted: all.clone(),
            grantable: all,
            denied_before: hashbrown::HashSet::new(),
        }
    }
    /// Nothing granted, and every prompt is refused.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::default()
    }
    /// Nothing granted yet, but prompts for these permissions will succeed.
    #[must_use]
    pub fn grantable(permissions: &[Permission]) -> Self {
        Self {
            grantable: permissions.iter().copied().collect(),
            ..Self::default()
        }
    }
    /// Mark permissions as previously refused, so a rationale is shown before prompting.
    #[must_use]
    pub fn with_prior_denial(mut self, permissions: &[Permission]) -> Self {
        self.denied_before.extend(permissions.iter().copied());
        self
    }
}
impl PermissionGate for StaticGate {
    fn is_granted(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }
    fn should_show_rationale(&self, permission: Permission) -> bool {
        !self.is_granted(permission) && self.denied_before.contains(&permission)
    }
    fn request(&mut self, permissions: &[Permission]) -> Vec<(Permission, bool)> {
        permissions
            .iter()
            .map(|&permission| {
                let granted = self.granted.contains(&permission)
                    || self.grantable.contains(&permission);
                if granted {
                    self.granted.insert(permission);
                } else {
                    self.denied_before.insert(permission);
                }
                log::debug!("permission {} granted: {granted}", permission.as_ref());
                (permission, granted)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{Permission, PermissionGate, StaticGate};
    #[test]
    fn request_grants_grantable_only() {
        let mut gate = StaticGate::grantable(&[Permission::ReadStorage]);
        assert!(!gate.is_granted(Permission::ReadStorage));
        let answers = gate.request(&[Permission::ReadStorage, Permission::WriteStorage]);
        assert_eq!(
            answers,
            vec![
                (Permission::ReadStorage, true),
                (Permission::WriteStorage, false)
            ]
        );
        assert!(gate.is_granted(Permission::ReadStorage));
        // Refusal is remembered.
        assert!(gate.should_show_rationale(Permission::WriteStorage));
        assert!(!gate.should_show_rationale(Permission::ReadStorage));
    }
    #[test]
    fn presets() {
        let gate = StaticGate::allow_all();
        assert!(gate.is_granted(Permission::WriteStorage));
        let gate = StaticGate::deny_all().with_prior_denial(&[Permission::ReadStorage]);
        assert!(gate.should_show_rationale(Permission::ReadStorage));
        assert!(!gate.should_show_rationale(Permission::WriteStorage));
    }
}
