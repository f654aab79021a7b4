// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking layers of the root node.

use core::fmt;

/// A stacking layer.
///
/// Variants are declared from the lowest to the highest stacking priority, and
/// the derived ordering follows that declaration order.
/// Every layer is bound to exactly one container under the root; see
/// [`Scene::layer`](crate::Scene::layer).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Layer {
    /// Wallpapers and other desktop backgrounds.
    Background,
    /// Panels and docks placed below regular windows.
    Bottom,
    /// Regular windows on the current workspace.
    Workspace,
    /// Panels and docks placed above regular windows.
    Top,
    /// Override-redirect surfaces that manage their own stacking.
    Unmanaged,
    /// Lock screen surfaces.
    Lock,
    /// Desktop widgets drawn above everything else.
    DesktopWidget,
    /// Minimized windows. Kept in the scene but above all other content so
    /// that restore animations can run.
    Minimized,
}

impl Layer {
    /// Number of layers.
    pub const COUNT: usize = 8;

    /// Every layer, lowest first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Background,
        Self::Bottom,
        Self::Workspace,
        Self::Top,
        Self::Unmanaged,
        Self::Lock,
        Self::DesktopWidget,
        Self::Minimized,
    ];

    /// Position of this layer in [`Layer::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name used in diagnostics and by external tooling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Bottom => "bottom",
            Self::Workspace => "workspace",
            Self::Top => "top",
            Self::Unmanaged => "unmanaged",
            Self::Lock => "lock",
            Self::DesktopWidget => "dew",
            Self::Minimized => "minimized",
        }
    }

    /// Look up a layer by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
