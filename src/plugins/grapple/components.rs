use bevy::prelude::*;

/// Hook lifecycle.
///
/// `Loaded` only exists between construction and `launch`; the weapon launches a hook
/// before it is ever spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookState {
    #[default]
    Loaded,
    InFlight,
    Attached,
    Destroyed,
}

/// The projectile end of the grapple. Moves at constant velocity until it lands.
///
/// The hook does not know its weapon; `Weapon::owns` is the only ownership link.
#[derive(Component, Debug, Clone, Default)]
pub struct Hook {
    state: HookState,
    velocity: Vec2,
}

impl Hook {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> HookState {
        self.state
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.state == HookState::InFlight
    }

    /// Loaded -> InFlight with velocity `normalize(direction) * speed`.
    ///
    /// Not re-enterable: returns `None` on a hook that has already been launched.
    pub fn launch(&mut self, direction: Vec2, speed: f32) -> Option<Vec2> {
        if self.state != HookState::Loaded {
            return None;
        }
        let direction = direction.try_normalize().unwrap_or(Vec2::Y);
        self.velocity = direction * speed;
        self.state = HookState::InFlight;
        Some(self.velocity)
    }

    /// InFlight -> Attached. Returns whether the transition happened.
    pub fn attach(&mut self) -> bool {
        if self.state != HookState::InFlight {
            return false;
        }
        self.state = HookState::Attached;
        self.velocity = Vec2::ZERO;
        true
    }

    /// InFlight -> Destroyed on a hazard. Returns whether the transition happened.
    pub fn hit_hazard(&mut self) -> bool {
        if self.state != HookState::InFlight {
            return false;
        }
        self.destroy()
    }

    /// Any state -> Destroyed. Returns `false` if it was already destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.state == HookState::Destroyed {
            return false;
        }
        self.state = HookState::Destroyed;
        self.velocity = Vec2::ZERO;
        true
    }
}

/// The grapple gun on the player. Owns at most one hook.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub max_grapple_range: f32,
    /// Fire point distance along the player's facing.
    pub fire_offset: f32,
    hook: Option<Entity>,
    is_shooting: bool,
}

impl Weapon {
    pub fn new(max_grapple_range: f32, fire_offset: f32) -> Self {
        Self {
            max_grapple_range,
            fire_offset,
            hook: None,
            is_shooting: false,
        }
    }

    #[inline]
    pub fn hook(&self) -> Option<Entity> {
        self.hook
    }

    #[inline]
    pub fn is_shooting(&self) -> bool {
        self.is_shooting
    }

    #[inline]
    pub fn owns(&self, hook: Entity) -> bool {
        self.hook == Some(hook)
    }

    /// World-space fire point for a weapon carried by `carrier`.
    pub fn fire_point(&self, carrier: &Transform) -> Vec2 {
        carrier.translation.truncate() + facing(carrier) * self.fire_offset
    }

    /// Start a shot from `fire_point` towards `cursor`.
    ///
    /// Returns the (unnormalized) launch direction, or `None` when a shot is already in
    /// flight or a hook is still out. A missing or coincident cursor falls back to `facing`.
    pub fn fire(&mut self, fire_point: Vec2, cursor: Option<Vec2>, facing: Vec2) -> Option<Vec2> {
        if self.is_shooting || self.hook.is_some() {
            return None;
        }
        self.is_shooting = true;

        let direction = cursor
            .map(|c| c - fire_point)
            .filter(|d| d.length_squared() > 1e-6)
            .unwrap_or(facing);
        Some(direction)
    }

    /// Record the spawned hook for the shot started by `fire`.
    pub fn arm(&mut self, hook: Entity) {
        self.hook = Some(hook);
    }

    /// True iff a hook is out and further than `max_grapple_range` from the fire point.
    pub fn check_range_exceeded(&self, fire_point: Vec2, hook_position: Option<Vec2>) -> bool {
        match (self.hook, hook_position) {
            (Some(_), Some(p)) => (p - fire_point).length() > self.max_grapple_range,
            _ => false,
        }
    }

    /// Own hook attached: the shot is over, the hook stays for the swing.
    pub fn hook_landed(&mut self) {
        self.is_shooting = false;
    }

    /// Own hook lost on a hazard.
    pub fn hook_lost(&mut self) {
        self.is_shooting = false;
        self.hook = None;
    }

    /// Give up the hook (if any) and stop shooting. Safe to call with no hook.
    pub fn take_hook(&mut self) -> Option<Entity> {
        self.is_shooting = false;
        self.hook.take()
    }
}

/// Unit vector the carrier is facing (local +Y).
#[inline]
pub fn facing(carrier: &Transform) -> Vec2 {
    (carrier.rotation * Vec3::Y).truncate().try_normalize().unwrap_or(Vec2::Y)
}

/// Marker: remove from the world in PostUpdate.
///
/// Hooks are not despawned inside the fixed step; they are flagged and swept later so
/// subscribers later in the tick still see a `Destroyed` hook rather than a dangling id.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;
