//! Retained visual tree: ordered layers of plain shapes that the renderers
//! turn into SVG or canvas calls.

use super::transform::ViewTransform;
use super::value_objects::{Color, Layout};
use derive_more::Display;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
pub enum TextAnchor {
    #[default]
    #[strum(serialize = "start")]
    Start,
    #[strum(serialize = "middle")]
    Middle,
    #[strum(serialize = "end")]
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64, rx: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Open polyline
    Path { points: Vec<(f64, f64)> },
    Circle { cx: f64, cy: f64, r: f64 },
    Text { x: f64, y: f64, content: String, anchor: TextAnchor, font_size: f64, bold: bool },
}

impl Shape {
    /// Moves x coordinates through the view; widths are scaled, radii and
    /// font sizes are not.
    fn placed(&self, view: &ViewTransform) -> Shape {
        match self {
            Shape::Rect { x, y, width, height, rx } => Shape::Rect {
                x: view.apply_x(*x),
                y: *y,
                width: width * view.k,
                height: *height,
                rx: *rx,
            },
            Shape::Line { x1, y1, x2, y2 } => Shape::Line {
                x1: view.apply_x(*x1),
                y1: *y1,
                x2: view.apply_x(*x2),
                y2: *y2,
            },
            Shape::Path { points } => Shape::Path {
                points: points.iter().map(|(x, y)| (view.apply_x(*x), *y)).collect(),
            },
            Shape::Circle { cx, cy, r } => Shape::Circle { cx: view.apply_x(*cx), cy: *cy, r: *r },
            Shape::Text { x, y, content, anchor, font_size, bold } => Shape::Text {
                x: view.apply_x(*x),
                y: *y,
                content: content.clone(),
                anchor: *anchor,
                font_size: *font_size,
                bold: *bold,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// Dash and gap lengths
    pub dash: Option<(f64, f64)>,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, dash: None, opacity: 1.0 }
    }
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Self::default() }
    }

    pub fn with_stroke(self, color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..self }
    }

    pub fn dashed(self, dash: f64, gap: f64) -> Self {
        Self { dash: Some((dash, gap)), ..self }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }
}

/// Whether an element follows the view transform horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Positioned in pre-zoom space, moved by pan/zoom
    Data,
    /// Positioned in viewport pixels, ignores pan/zoom
    Pinned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub class: &'static str,
    pub shape: Shape,
    pub style: Style,
    pub placement: Placement,
}

impl Element {
    pub fn data(class: &'static str, shape: Shape, style: Style) -> Self {
        Self { class, shape, style, placement: Placement::Data }
    }

    pub fn pinned(class: &'static str, shape: Shape, style: Style) -> Self {
        Self { class, shape, style, placement: Placement::Pinned }
    }
}

/// Which translated group a layer is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerGroup {
    /// Clipped to the plot, origin at the plot's top-left
    Plot,
    /// Origin at the plot's bottom-left
    XAxis,
    /// Origin at the plot's top-left, drawn outside the clip
    YAxis,
}

/// Layers in paint order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum LayerId {
    #[display(fmt = "grid")]
    #[strum(serialize = "grid")]
    Grid,
    #[display(fmt = "volume")]
    #[strum(serialize = "volume")]
    Volume,
    #[display(fmt = "candles")]
    #[strum(serialize = "candles")]
    Candles,
    #[display(fmt = "line")]
    #[strum(serialize = "line")]
    Line,
    #[display(fmt = "drawings")]
    #[strum(serialize = "drawings")]
    Drawings,
    #[display(fmt = "preview")]
    #[strum(serialize = "preview")]
    Preview,
    #[display(fmt = "annotations")]
    #[strum(serialize = "annotations")]
    Annotations,
    #[display(fmt = "x-axis")]
    #[strum(serialize = "x-axis")]
    XAxis,
    #[display(fmt = "y-axis")]
    #[strum(serialize = "y-axis")]
    YAxis,
}

impl LayerId {
    pub fn group(&self) -> LayerGroup {
        match self {
            LayerId::XAxis => LayerGroup::XAxis,
            LayerId::YAxis => LayerGroup::YAxis,
            _ => LayerGroup::Plot,
        }
    }

    /// Layers whose data-placed elements move with pan/zoom
    pub fn follows_view(&self) -> bool {
        matches!(
            self,
            LayerId::Volume | LayerId::Candles | LayerId::Line | LayerId::Drawings | LayerId::Preview
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    elements: Vec<Element>,
    view: ViewTransform,
    revision: u64,
}

impl Layer {
    fn new(id: LayerId) -> Self {
        Self { id, elements: Vec::new(), view: ViewTransform::IDENTITY, revision: 0 }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes every element; the view transform is kept
    pub fn clear(&mut self) {
        self.elements.clear();
        self.revision += 1;
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
        self.revision += 1;
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
        self.revision += 1;
    }

    pub fn set_view(&mut self, view: ViewTransform) {
        if self.view != view {
            self.view = view;
            self.revision += 1;
        }
    }

    /// Elements with the view transform applied to data-placed ones
    pub fn placed_elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.elements.iter().map(|element| match element.placement {
            Placement::Data if !self.view.is_identity() => Element {
                shape: element.shape.placed(&self.view),
                ..element.clone()
            },
            _ => element.clone(),
        })
    }
}

/// The whole chart picture: layout plus layers in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    layout: Layout,
    layers: Vec<Layer>,
}

impl Scene {
    pub fn new(layout: Layout) -> Self {
        Self { layout, layers: LayerId::iter().map(Layer::new).collect() }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id as usize]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id as usize]
    }

    /// Layers drawn inside one group, in paint order
    pub fn group(&self, group: LayerGroup) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(move |layer| layer.id.group() == group)
    }
}
