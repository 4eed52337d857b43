// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SDF (Simulation Description Format) serialization
//!
//! Produces a static model with one link per wall. Each link carries a
//! collision and a visual element sharing the same box geometry and pose.

use crate::error::{Error, Result};
use crate::scene::{Pose, Size, Wall, World};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

pub const SDF_VERSION: &str = "1.4";
pub const WALL_MATERIAL: &str = "Gazebo/Grey";
pub const MATERIAL_URI: &str = "file://media/materials/scripts/gazebo.material";

/// Render a world as an indented SDF document
pub fn to_sdf_string(world: &World) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_world(&mut writer, world)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
}

/// Write a world, including the XML declaration, to any writer
pub fn write_world<W: Write>(writer: &mut Writer<W>, world: &World) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let mut sdf = BytesStart::new("sdf");
    sdf.push_attribute(("version", SDF_VERSION));
    writer.write_event(Event::Start(sdf))?;

    open_named(writer, "model", &world.model_name)?;
    text_element(writer, "static", "1")?;
    for wall in &world.walls {
        write_wall(writer, wall)?;
    }
    close(writer, "model")?;

    close(writer, "sdf")
}

fn write_wall<W: Write>(writer: &mut Writer<W>, wall: &Wall) -> Result<()> {
    let link = wall.link_name();
    open_named(writer, "link", &link)?;

    open_named(writer, "collision", &format!("{}_Collision", link))?;
    write_geometry(writer, &wall.size)?;
    write_pose(writer, &wall.pose)?;
    close(writer, "collision")?;

    open_named(writer, "visual", &format!("{}_Visual", link))?;
    write_geometry(writer, &wall.size)?;
    write_material(writer)?;
    write_pose(writer, &wall.pose)?;
    close(writer, "visual")?;

    close(writer, "link")
}

fn write_geometry<W: Write>(writer: &mut Writer<W>, size: &Size) -> Result<()> {
    open(writer, "geometry")?;
    open(writer, "box")?;
    text_element(writer, "size", &format_size(size))?;
    close(writer, "box")?;
    close(writer, "geometry")
}

fn write_material<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    open(writer, "material")?;
    open(writer, "script")?;
    text_element(writer, "uri", MATERIAL_URI)?;
    text_element(writer, "name", WALL_MATERIAL)?;
    close(writer, "script")?;
    close(writer, "material")
}

fn write_pose<W: Write>(writer: &mut Writer<W>, pose: &Pose) -> Result<()> {
    text_element(writer, "pose", &format_pose(pose))
}

/// `x y z roll pitch yaw`, five decimals; roll and pitch are always zero
pub fn format_pose(pose: &Pose) -> String {
    let p = &pose.position;
    format!("{:.5} {:.5} {:.5} 0 0 {:.5}", p.x, p.y, p.z, pose.yaw)
}

pub fn format_size(size: &Size) -> String {
    format!("{:.5} {:.5} {:.5}", size.x(), size.y(), size.z())
}

fn open<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn open_named<W: Write>(writer: &mut Writer<W>, tag: &str, name: &str) -> Result<()> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("name", name));
    writer.write_event(Event::Start(start))?;
    Ok(())
}

fn close<W: Write>(writer: &mut Writer<W>, tag: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    open(writer, tag)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    close(writer, tag)
}
