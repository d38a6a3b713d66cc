//! `isosurface` trace and its slice planes

use once_cell::sync::Lazy;
use serde_json::json;

use crate::schema::NodeSchema;
use crate::validators::{Enumerated, NumberRange, StringRules, ValidatorKind};

pub static ISOSURFACE: Lazy<NodeSchema> = Lazy::new(|| {
    NodeSchema::new("isosurface", "", "Isosurface")
        .field(
            "visible",
            ValidatorKind::Enumerated(Enumerated::new(vec![json!(true), json!(false), json!("legendonly")])),
            "calc",
            "Determines whether or not this trace is visible. If \"legendonly\", the trace is not drawn, but can appear as a legend item.",
        )
        .field("name", ValidatorKind::String(StringRules::new()), "style", "Sets the trace name.")
        .field("opacity", ValidatorKind::Number(NumberRange::between(0.0, 1.0)), "calc", "Sets the opacity of the surface.")
        .field("x", ValidatorKind::DataArray, "calc+clearAxisTypes", "Sets the X coordinates of the vertices on X axis.")
        .field("y", ValidatorKind::DataArray, "calc+clearAxisTypes", "Sets the Y coordinates of the vertices on Y axis.")
        .field("z", ValidatorKind::DataArray, "calc+clearAxisTypes", "Sets the Z coordinates of the vertices on Z axis.")
        .field("value", ValidatorKind::DataArray, "calc", "Sets the 4th dimension (value) of the vertices.")
        .field("isomin", ValidatorKind::Number(NumberRange::any()), "calc", "Sets the minimum boundary for iso-surface plot.")
        .field("isomax", ValidatorKind::Number(NumberRange::any()), "calc", "Sets the maximum boundary for iso-surface plot.")
        .field(
            "slices",
            ValidatorKind::Compound(|| &*SLICES),
            "calc",
            "Slice planes along each axis, as a mapping or an instance of Slices.",
        )
});

pub static SLICES: Lazy<NodeSchema> = Lazy::new(|| {
    NodeSchema::new("slices", "isosurface", "Slices")
        .field("x", ValidatorKind::Compound(|| &*SLICES_X), "calc", "Slices along the x axis.")
        .field("y", ValidatorKind::Compound(|| &*SLICES_Y), "calc", "Slices along the y axis.")
        .field("z", ValidatorKind::Compound(|| &*SLICES_Z), "calc", "Slices along the z axis.")
});

fn slice_plane(axis: &'static str, type_name: &'static str) -> NodeSchema {
    NodeSchema::new(axis, "isosurface.slices", type_name)
        .field(
            "fill",
            ValidatorKind::Number(NumberRange::between(0.0, 1.0)),
            "calc",
            "Sets the fill ratio of the `slices`. The default fill value of the `slices` is 1 meaning that they are entirely shaded.",
        )
        .field(
            "locations",
            ValidatorKind::DataArray,
            "calc",
            "Specifies the location(s) of slices on the axis. When not specified slices would be created for all points of the axis.",
        )
        .field(
            "locationssrc",
            ValidatorKind::String(StringRules::new().strict()),
            "none",
            "Sets the source reference on Chart Studio Cloud for `locations`.",
        )
        .field(
            "show",
            ValidatorKind::Boolean,
            "calc",
            "Determines whether or not slice planes about this axis are drawn.",
        )
}

pub static SLICES_X: Lazy<NodeSchema> = Lazy::new(|| slice_plane("x", "SlicesX"));
pub static SLICES_Y: Lazy<NodeSchema> = Lazy::new(|| slice_plane("y", "SlicesY"));
pub static SLICES_Z: Lazy<NodeSchema> = Lazy::new(|| slice_plane("z", "SlicesZ"));

node_type! {
    /// An isosurface trace
    pub struct Isosurface(ISOSURFACE) {
        visible / set_visible: value = "visible",
        name / set_name: str = "name",
        opacity / set_opacity: f64 = "opacity",
        x / set_x: value = "x",
        y / set_y: value = "y",
        z / set_z: value = "z",
        value / set_value: value = "value",
        isomin / set_isomin: f64 = "isomin",
        isomax / set_isomax: f64 = "isomax",
        slices / set_slices: node = "slices",
    }
}

node_type! {
    /// Slice planes of an isosurface
    pub struct Slices(SLICES) {
        x / set_x: node = "x",
        y / set_y: node = "y",
        z / set_z: node = "z",
    }
}

node_type! {
    pub struct SlicesX(SLICES_X) {
        fill / set_fill: f64 = "fill",
        locations / set_locations: value = "locations",
        locationssrc / set_locationssrc: str = "locationssrc",
        show / set_show: bool = "show",
    }
}

node_type! {
    pub struct SlicesY(SLICES_Y) {
        fill / set_fill: f64 = "fill",
        locations / set_locations: value = "locations",
        locationssrc / set_locationssrc: str = "locationssrc",
        show / set_show: bool = "show",
    }
}

node_type! {
    pub struct SlicesZ(SLICES_Z) {
        fill / set_fill: f64 = "fill",
        locations / set_locations: value = "locations",
        locationssrc / set_locationssrc: str = "locationssrc",
        show / set_show: bool = "show",
    }
}
