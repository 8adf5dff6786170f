// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Survivor list with search and distance filtering.
    Directory,
    /// A single survivor: inventory, location, reporting, trading.
    Profile,
    /// New survivor registration form.
    Register,
}
