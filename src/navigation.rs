//! Point navigation indicators
//!
//! A fixed row of navigation points, exactly one of which is drawn filled.
//! Each point maps to the transition it starts; point 2 is the one that
//! launches the composite color + rotation sequence.

use crate::animation::TransitionKind;

/// One of the fixed navigation points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavPoint {
    Point1,
    Point2,
    Point3,
}

impl NavPoint {
    pub const ALL: [NavPoint; 3] = [NavPoint::Point1, NavPoint::Point2, NavPoint::Point3];

    /// Transition started when this point is clicked
    pub fn transition(self) -> TransitionKind {
        match self {
            NavPoint::Point1 => TransitionKind::Reset,
            NavPoint::Point2 => TransitionKind::Composite,
            NavPoint::Point3 => TransitionKind::ZoomAndLoop,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NavPoint::Point1 => "point1",
            NavPoint::Point2 => "point2",
            NavPoint::Point3 => "point3",
        }
    }
}

/// Mutually exclusive "filled" state over the navigation points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationBar {
    filled: [bool; 3],
}

impl NavigationBar {
    pub fn new(initial: Option<NavPoint>) -> Self {
        let mut bar = Self { filled: [false; 3] };
        if let Some(point) = initial {
            bar.activate(point);
        }
        bar
    }

    /// Clears every indicator, then fills `point`
    pub fn activate(&mut self, point: NavPoint) {
        self.filled = [false; 3];
        self.filled[Self::slot(point)] = true;
    }

    pub fn is_active(&self, point: NavPoint) -> bool {
        self.filled[Self::slot(point)]
    }

    pub fn active(&self) -> Option<NavPoint> {
        NavPoint::ALL.into_iter().find(|point| self.is_active(*point))
    }

    /// Points in display order with their filled state
    pub fn indicators(&self) -> impl Iterator<Item = (NavPoint, bool)> + '_ {
        NavPoint::ALL
            .into_iter()
            .map(move |point| (point, self.is_active(point)))
    }

    fn slot(point: NavPoint) -> usize {
        match point {
            NavPoint::Point1 => 0,
            NavPoint::Point2 => 1,
            NavPoint::Point3 => 2,
        }
    }
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self::new(Some(NavPoint::Point1))
    }
}
