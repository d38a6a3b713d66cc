//! `layout` and the objects hanging off it

use once_cell::sync::Lazy;
use serde_json::json;

use crate::schema::NodeSchema;
use crate::validators::{ColorRules, Enumerated, NumberRange, StringRules, ValidatorKind};

pub static LAYOUT: Lazy<NodeSchema> = Lazy::new(|| {
    NodeSchema::new("layout", "", "Layout")
        .field("title", ValidatorKind::String(StringRules::new()), "layoutstyle", "Sets the plot's title.")
        .field("xaxis", ValidatorKind::Compound(|| &*XAXIS), "plot", "The x axis, as a mapping or an instance of XAxis.")
        .field(
            "annotations",
            ValidatorKind::CompoundArray(|| &*ANNOTATION),
            "calc+arraydraw",
            "A sequence of annotations, each a mapping or an instance of Annotation.",
        )
        .field(
            "paper_bgcolor",
            ValidatorKind::Color(ColorRules::new()),
            "plot",
            "Sets the background color of the paper where the graph is drawn.",
        )
        .field("showlegend", ValidatorKind::Boolean, "legend", "Determines whether or not a legend is drawn.")
        .field(
            "width",
            ValidatorKind::Number(NumberRange::at_least(10.0)),
            "plot",
            "Sets the plot's width (in px).",
        )
});

pub static XAXIS: Lazy<NodeSchema> = Lazy::new(|| {
    NodeSchema::new("xaxis", "layout", "XAxis")
        .field(
            "exponentformat",
            ValidatorKind::Enumerated(Enumerated::from_strs(&["none", "e", "E", "power", "SI", "B"])),
            "ticks+margins",
            "Determines a formatting rule for the tick exponents.",
        )
        .field(
            "showexponent",
            ValidatorKind::Enumerated(Enumerated::from_strs(&["all", "first", "last", "none"])),
            "ticks+margins",
            "If \"all\", all exponents are shown besides their significands.",
        )
        .field(
            "tickformat",
            ValidatorKind::String(StringRules::new()),
            "ticks+margins",
            "Sets the tick label formatting rule using d3 formatting mini-languages.",
        )
        .field(
            "nticks",
            ValidatorKind::Number(NumberRange::at_least(0.0).integer()),
            "ticks+margins",
            "Specifies the maximum number of ticks for the axis.",
        )
        .field("color", ValidatorKind::Color(ColorRules::new()), "ticks", "Sets default for all colors associated with this axis.")
        .field(
            "autorange",
            ValidatorKind::Enumerated(Enumerated::new(vec![json!(true), json!(false), json!("reversed")])),
            "axrange",
            "Determines whether or not the range of this axis is computed in relation to the input data.",
        )
        .field("range", ValidatorKind::DataArray, "axrange", "Sets the range of this axis.")
        .field(
            "anchor",
            ValidatorKind::Enumerated(Enumerated::new(vec![json!("free"), json!("/^y([2-9]|[1-9][0-9]+)?$/")])),
            "plot",
            "If set to an opposite-letter axis id (e.g. `y2`), this axis is bound to the corresponding opposite-letter axis.",
        )
        .field("title", ValidatorKind::Compound(|| &*XAXIS_TITLE), "ticks", "The axis title, as a mapping or an instance of Title.")
        .field("tickfont", ValidatorKind::Compound(|| &*XAXIS_TICKFONT), "ticks", "Sets the tick font.")
        .alias("titlefont", "title.font")
});

pub static XAXIS_TITLE: Lazy<NodeSchema> = Lazy::new(|| {
    NodeSchema::new("title", "layout.xaxis", "Title")
        .field("text", ValidatorKind::String(StringRules::new()), "ticks", "Sets the title of this axis.")
        .field("font", ValidatorKind::Compound(|| &*XAXIS_TITLE_FONT), "ticks", "Sets this axis' title font.")
});

fn font(name: &'static str, parent_path: &'static str, edit_type: &'static str) -> NodeSchema {
    NodeSchema::new(name, parent_path, "Font")
        .field(
            "family",
            ValidatorKind::String(StringRules::new().strict().no_blank()),
            edit_type,
            "HTML font family - the typeface that will be applied by the web browser.",
        )
        .field("size", ValidatorKind::Number(NumberRange::at_least(1.0)), edit_type, "Sets the font size.")
        .field("color", ValidatorKind::Color(ColorRules::new()), edit_type, "Sets the font color.")
}

pub static XAXIS_TITLE_FONT: Lazy<NodeSchema> = Lazy::new(|| font("font", "layout.xaxis.title", "ticks"));
pub static XAXIS_TICKFONT: Lazy<NodeSchema> = Lazy::new(|| font("tickfont", "layout.xaxis", "ticks"));
pub static ANNOTATION_FONT: Lazy<NodeSchema> = Lazy::new(|| font("font", "layout.annotation", "calc+arraydraw"));

pub static ANNOTATION: Lazy<NodeSchema> = Lazy::new(|| {
    NodeSchema::new("annotation", "layout", "Annotation")
        .field(
            "text",
            ValidatorKind::String(StringRules::new()),
            "calc+arraydraw",
            "Sets the text associated with this annotation.",
        )
        .field(
            "showarrow",
            ValidatorKind::Boolean,
            "calc+arraydraw",
            "Determines whether or not the annotation is drawn with an arrow.",
        )
        .field("x", ValidatorKind::Number(NumberRange::any()), "calc+arraydraw", "Sets the annotation's x position.")
        .field("y", ValidatorKind::Number(NumberRange::any()), "calc+arraydraw", "Sets the annotation's y position.")
        .field(
            "xref",
            ValidatorKind::Enumerated(Enumerated::new(vec![json!("paper"), json!("/^x([2-9]|[1-9][0-9]+)?$/")])),
            "calc",
            "Sets the annotation's x coordinate axis.",
        )
        .field("font", ValidatorKind::Compound(|| &*ANNOTATION_FONT), "calc+arraydraw", "Sets the annotation text font.")
        .field("arrowcolor", ValidatorKind::Color(ColorRules::new()), "arraydraw", "Sets the color of the annotation arrow.")
        .field("visible", ValidatorKind::Boolean, "calc+arraydraw", "Determines whether or not this annotation is visible.")
});

node_type! {
    /// Figure layout
    pub struct Layout(LAYOUT) {
        title / set_title: str = "title",
        xaxis / set_xaxis: node = "xaxis",
        annotations / set_annotations: nodes = "annotations",
        paper_bgcolor / set_paper_bgcolor: str = "paper_bgcolor",
        showlegend / set_showlegend: bool = "showlegend",
        width / set_width: f64 = "width",
    }
}

node_type! {
    pub struct XAxis(XAXIS) {
        exponentformat / set_exponentformat: str = "exponentformat",
        showexponent / set_showexponent: str = "showexponent",
        tickformat / set_tickformat: str = "tickformat",
        nticks / set_nticks: i64 = "nticks",
        color / set_color: str = "color",
        autorange / set_autorange: value = "autorange",
        range / set_range: value = "range",
        anchor / set_anchor: str = "anchor",
        title / set_title: node = "title",
        tickfont / set_tickfont: node = "tickfont",
    }
}

node_type! {
    /// A single layout annotation
    pub struct Annotation(ANNOTATION) {
        text / set_text: str = "text",
        showarrow / set_showarrow: bool = "showarrow",
        x / set_x: f64 = "x",
        y / set_y: f64 = "y",
        xref / set_xref: str = "xref",
        font / set_font: node = "font",
        arrowcolor / set_arrowcolor: str = "arrowcolor",
        visible / set_visible: bool = "visible",
    }
}
