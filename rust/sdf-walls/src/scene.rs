// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene building: pixel rectangles to physical walls

use crate::error::Result;
use crate::types::Rect;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Position of a box center plus rotation about the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3<f64>,
    /// Yaw in radians
    pub yaw: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64, yaw: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            yaw,
        }
    }
}

/// Box extents along x, y and z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size(pub Vector3<f64>);

impl Size {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }
}

/// A wall box in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub uid: u64,
    pub pose: Pose,
    pub size: Size,
}

impl Wall {
    /// Name of the link element for this wall
    pub fn link_name(&self) -> String {
        format!("Wall_{}", self.uid)
    }
}

/// A named collection of walls, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub model_name: String,
    pub walls: Vec<Wall>,
}

impl World {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            walls: Vec::new(),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Maps rectangles to walls and hands out wall identifiers
///
/// Identifiers come from a counter owned by the builder, so independent
/// conversions never share numbering.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    scale: f64,
    wall_height: f64,
    next_uid: u64,
    walls: Vec<Wall>,
}

impl SceneBuilder {
    /// `scale` converts pixels to meters; `wall_height` is the extrusion height
    pub fn new(scale: f64, wall_height: f64) -> Self {
        Self {
            scale,
            wall_height,
            next_uid: 0,
            walls: Vec::new(),
        }
    }

    /// Start numbering at `uid` instead of zero
    pub fn with_first_uid(mut self, uid: u64) -> Self {
        self.next_uid = uid;
        self
    }

    /// Physical pose of a rectangle; image y grows downward, world y upward
    pub fn pose_for(&self, rect: &Rect) -> Pose {
        let s = self.scale;
        Pose::new(
            (rect.x as f64 + rect.w as f64 / 2.0) * s,
            -(rect.y as f64 + rect.h as f64 / 2.0) * s,
            self.wall_height / 2.0,
            0.0,
        )
    }

    pub fn size_for(&self, rect: &Rect) -> Size {
        Size::new(
            rect.w as f64 * self.scale,
            rect.h as f64 * self.scale,
            self.wall_height,
        )
    }

    /// Append a wall for `rect` and return it
    pub fn add_rect(&mut self, rect: &Rect) -> &Wall {
        let wall = Wall {
            uid: self.next_uid,
            pose: self.pose_for(rect),
            size: self.size_for(rect),
        };
        self.next_uid += 1;
        self.walls.push(wall);
        &self.walls[self.walls.len() - 1]
    }

    pub fn extend<'a, I>(&mut self, rects: I)
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        for rect in rects {
            self.add_rect(rect);
        }
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn build(self, model_name: impl Into<String>) -> World {
        World {
            model_name: model_name.into(),
            walls: self.walls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pose_and_size_mapping() {
        let mut builder = SceneBuilder::new(0.5, 2.0);
        let wall = builder.add_rect(&Rect::new(2, 3, 4, 1)).clone();

        assert_relative_eq!(wall.pose.position.x, 2.0);
        assert_relative_eq!(wall.pose.position.y, -1.75);
        assert_relative_eq!(wall.pose.position.z, 1.0);
        assert_relative_eq!(wall.pose.yaw, 0.0);
        assert_relative_eq!(wall.size.x(), 2.0);
        assert_relative_eq!(wall.size.y(), 0.5);
        assert_relative_eq!(wall.size.z(), 2.0);
    }

    #[test]
    fn test_uids_increase_in_emission_order() {
        let mut builder = SceneBuilder::new(1.0, 1.0);
        builder.extend(&[Rect::new(0, 0, 1, 1), Rect::new(2, 0, 1, 1), Rect::new(0, 1, 3, 1)]);
        let world = builder.build("Test");

        let uids: Vec<u64> = world.walls.iter().map(|w| w.uid).collect();
        assert_eq!(uids, vec![0, 1, 2]);
        assert_eq!(world.walls[1].link_name(), "Wall_1");
    }

    #[test]
    fn test_builders_do_not_share_uids() {
        let mut a = SceneBuilder::new(1.0, 1.0);
        let mut b = SceneBuilder::new(1.0, 1.0);
        a.add_rect(&Rect::new(0, 0, 1, 1));
        a.add_rect(&Rect::new(1, 0, 1, 1));
        assert_eq!(b.add_rect(&Rect::new(0, 0, 1, 1)).uid, 0);
    }

    #[test]
    fn test_first_uid() {
        let mut builder = SceneBuilder::new(1.0, 1.0).with_first_uid(10);
        assert_eq!(builder.add_rect(&Rect::new(0, 0, 1, 1)).uid, 10);
        assert_eq!(builder.add_rect(&Rect::new(1, 0, 1, 1)).uid, 11);
        assert_eq!(builder.wall_count(), 2);
    }

    #[test]
    fn test_world_json() {
        let mut builder = SceneBuilder::new(1.0, 1.0);
        builder.add_rect(&Rect::new(0, 0, 2, 1));
        let json = builder.build("JsonWorld").to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model_name"], "JsonWorld");
        assert_eq!(value["walls"][0]["uid"], 0);
    }
}
