//! Agent state enums.
//!
//! All of these are closed enums matched exhaustively at every decision
//! point; adding a variant is a compile error at each dispatch site rather
//! than a silently-skipped branch.

use nursery_core::ClassId;

// ── Toilet journey ────────────────────────────────────────────────────────────

/// Where an agent is in its toilet journey.
///
/// Legal traversal (driven by [`ToiletPipeline`](crate::ToiletPipeline)):
///
/// ```text
/// NotUsing → WantToGo → {WaitingForQueue ⇄} InQueue → InCubicle
///          → {InSink | WaitingForSink → InSink}
///          → {JustEnded → NotUsing | NotUsing}
/// ```
///
/// `JustEnded` marks the walk back for classes that detour around the
/// building; classes adjacent to the toilet return straight to `NotUsing`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ToiletState {
    #[default]
    NotUsing,
    WantToGo,
    WaitingForQueue,
    InQueue,
    InCubicle,
    WaitingForSink,
    InSink,
    JustEnded,
}

impl ToiletState {
    /// `true` while the agent is anywhere in the pipeline.  Class event
    /// phases cannot advance while any member is mid-journey.
    #[inline]
    pub fn is_mid_journey(self) -> bool {
        self != ToiletState::NotUsing
    }
}

// ── Role statuses ─────────────────────────────────────────────────────────────

/// What a student is currently doing.  Mutually exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StudentStatus {
    Free,
    Learning,
    Eating,
    Others,
    Preparing,
    CleaningUp,
    Napping,
}

/// What a staff member is currently doing.  Mutually exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StaffStatus {
    Free,
    Teaching,
    Preparing,
    CleaningUp,
    /// Hanging out at one of the staff corners.
    Chilling,
    /// Resting in the break room.
    Break,
    /// Visiting the principal's office.
    Talking,
}

/// What the principal is currently doing.  Mutually exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PrincipalStatus {
    Free,
    InOffice,
    Supervising,
    Chilling,
}

/// Permanent class staff vs. the floating pool rotated between classes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StaffKind {
    Class,
    Floating,
}

/// Which staff hangout corner an agent picked for its free time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ChillSpot {
    BreakRoom,
    Kitchenette,
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// Role-specific state, one variant per agent kind.
///
/// The principal is not a special registry entry anywhere — it is simply an
/// agent whose role is `Principal`, constructed exactly once by the
/// scheduler.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Role {
    Student {
        status: StudentStatus,
    },
    Staff {
        status: StaffStatus,
        kind: StaffKind,
        chill_spot: Option<ChillSpot>,
        /// Rotation slot for floating staff, fixed at construction and
        /// advanced by one class per rotation event.  Unused for
        /// `StaffKind::Class`.
        rotation_offset: usize,
    },
    Principal {
        status: PrincipalStatus,
        /// The class currently being supervised; re-snapshotted each time a
        /// supervision episode starts.
        supervised: ClassId,
        chill_spot: Option<ChillSpot>,
    },
}

impl Role {
    pub fn student() -> Role {
        Role::Student { status: StudentStatus::Free }
    }

    pub fn staff(kind: StaffKind, rotation_offset: usize) -> Role {
        Role::Staff {
            status: StaffStatus::Free,
            kind,
            chill_spot: None,
            rotation_offset,
        }
    }

    pub fn principal(supervised: ClassId) -> Role {
        Role::Principal {
            status: PrincipalStatus::Free,
            supervised,
            chill_spot: None,
        }
    }
}
