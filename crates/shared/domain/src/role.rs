//! User roles and the bit-mask role set.
//!
//! A user holds zero or more roles at once. The set is stored as a single
//! mask where each role owns one bit; [`RoleSet::combine`] and
//! [`RoleSet::decompose`] convert between the two representations.

use std::fmt;

use crate::error::{DomainError, DomainResult};

coded_enum! {
    /// A single permission category. The code is the role's bit in the mask.
    pub enum Role ("role") {
        Administration = 1,
        Clinician = 2,
        Staff = 4,
        Patient = 8,
    }
}

impl Role {
    /// Bit owned by this role in a [`RoleSet`] mask
    pub const fn bit(self) -> u8 {
        self.code() as u8
    }
}

/// Set of roles held by a user, backed by a bit-mask.
///
/// Iteration and [`decompose`](RoleSet::decompose) always follow the
/// canonical order of [`Role::ALL`]. The mask never carries bits outside the
/// defined roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set ("None")
    pub const NONE: RoleSet = RoleSet(0);

    /// Union of every defined role bit
    pub const VALID_BITS: u8 = Role::Administration.bit()
        | Role::Clinician.bit()
        | Role::Staff.bit()
        | Role::Patient.bit();

    /// Fold roles into a mask with bitwise OR, starting from the empty set.
    ///
    /// Order and duplicates are irrelevant; an empty input yields [`RoleSet::NONE`].
    pub fn combine<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        roles.into_iter().fold(Self::NONE, RoleSet::with)
    }

    /// Expand the mask into its roles, in canonical order.
    pub fn decompose(self) -> Vec<Role> {
        self.iter().collect()
    }

    /// Decode a stored mask, rejecting bits outside the defined roles.
    pub fn from_bits(bits: i64) -> DomainResult<Self> {
        match u8::try_from(bits) {
            Ok(mask) if mask & !Self::VALID_BITS == 0 => Ok(RoleSet(mask)),
            _ => Err(DomainError::invalid_value("role mask", bits)),
        }
    }

    /// Raw mask value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `role` is a member of the set
    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// The set with `role` added
    pub const fn with(self, role: Role) -> Self {
        RoleSet(self.0 | role.bit())
    }

    /// Whether no role is held
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_administration(self) -> bool {
        self.contains(Role::Administration)
    }

    pub const fn is_clinician(self) -> bool {
        self.contains(Role::Clinician)
    }

    pub const fn is_staff(self) -> bool {
        self.contains(Role::Staff)
    }

    pub const fn is_patient(self) -> bool {
        self.contains(Role::Patient)
    }

    /// Roles in the set, in canonical order
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.iter().copied().filter(move |role| self.contains(*role))
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet::NONE.with(role)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        RoleSet::combine(iter)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let names: Vec<&str> = self.iter().map(Role::name).collect();
        f.write_str(&names.join(", "))
    }
}
