// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain geometry values shared between the engine and the host.
//!
//! Two coordinate spaces exist: the *pointer space* (whatever space the host
//! reports pointer events and element rectangles in) and the *canvas space*
//! (scroll-independent content coordinates that block positions live in).
//! [`CanvasMetrics`](crate::host::CanvasMetrics) converts between the two.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle identified by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            left: center.x - size.width / 2.0,
            top: center.y - size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Size};

    #[test]
    fn rect_round_trips_through_center() {
        let rect = Rect::from_center(Point::new(100.0, 40.0), Size::new(80.0, 20.0));
        assert_eq!(rect.left, 60.0);
        assert_eq!(rect.top, 30.0);
        assert_eq!(rect.right(), 140.0);
        assert_eq!(rect.bottom(), 50.0);
        assert_eq!(rect.center(), Point::new(100.0, 40.0));
    }
}
