//! Buff registry
//!
//! Short-lived named modifiers on the player (currently just the
//! double-jump buff). At most one buff per name; re-adding restarts
//! the clock. Durations tick down in seconds and expire on their own,
//! or get cleared early when their effect is consumed (a buffed jump
//! eats the buff).

/// Name of the double-jump buff granted by the glitch-jump skill.
pub const X2JUMP: &str = "x2jump";
/// Extra launch power while [`X2JUMP`] is active (negative is up).
pub const X2JUMP_POWER_BONUS: f32 = -1.15;

/// A single active buff.
#[derive(Debug, Clone, PartialEq)]
pub struct Buff {
    pub name: String,
    /// Seconds left
    pub remaining: f32,
    /// Starting duration (UI draws the drain bar from this)
    pub duration: f32,
}

/// All buffs currently on the player.
#[derive(Debug, Clone, Default)]
pub struct BuffRegistry {
    buffs: Vec<Buff>,
}

impl BuffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a buff, replacing any existing buff with the same name.
    pub fn add(&mut self, name: impl Into<String>, duration: f32) {
        let name = name.into();
        self.buffs.retain(|b| b.name != name);
        self.buffs.push(Buff {
            name,
            remaining: duration,
            duration,
        });
    }

    /// Tick all buffs down by `dt` seconds and drop the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for buff in &mut self.buffs {
            buff.remaining -= dt;
        }
        self.buffs.retain(|b| b.remaining > 0.0);
    }

    /// Remove a buff whose effect was just consumed. Returns true if
    /// it was present.
    pub fn clear(&mut self, name: &str) -> bool {
        let before = self.buffs.len();
        self.buffs.retain(|b| b.name != name);
        self.buffs.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buffs.iter().any(|b| b.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Buff> {
        self.buffs.iter().find(|b| b.name == name)
    }

    /// Active buffs in insertion order (UI chips).
    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let mut buffs = BuffRegistry::new();
        assert!(!buffs.contains(X2JUMP));
        buffs.add(X2JUMP, 1.5);
        assert!(buffs.contains(X2JUMP));
        assert_eq!(buffs.get(X2JUMP).unwrap().remaining, 1.5);
    }

    #[test]
    fn test_re_add_replaces_instead_of_stacking() {
        let mut buffs = BuffRegistry::new();
        buffs.add(X2JUMP, 1.5);
        buffs.tick(1.0);
        buffs.add(X2JUMP, 1.5);

        assert_eq!(buffs.iter().count(), 1);
        assert_eq!(buffs.get(X2JUMP).unwrap().remaining, 1.5);
    }

    #[test]
    fn test_tick_evicts_expired() {
        let mut buffs = BuffRegistry::new();
        buffs.add(X2JUMP, 0.5);
        buffs.add("shield", 2.0);

        buffs.tick(1.0);
        assert!(!buffs.contains(X2JUMP));
        assert!(buffs.contains("shield"));

        buffs.tick(1.0);
        assert!(buffs.is_empty());
    }

    #[test]
    fn test_clear_on_consume() {
        let mut buffs = BuffRegistry::new();
        buffs.add(X2JUMP, 1.5);
        assert!(buffs.clear(X2JUMP));
        assert!(!buffs.contains(X2JUMP));
        assert!(!buffs.clear(X2JUMP));
    }
}
