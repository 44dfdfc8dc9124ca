//! Layer composition.
//!
//! [`render`] is a pure function of the map state: it fits a fresh
//! projection and rebuilds every layer from scratch. [`Compositor`] holds
//! the external state and pushes a full redraw to its [`Surface`] after
//! every change.

pub mod svg;

use serde::Serialize;

use crate::config::{RenderConfig, Viewport};
use crate::dataset::{filter_points, DatasetId, DatasetSlot, LoadTicket};
use crate::error::ConfigError;
use crate::geo::FeatureCollection;
use crate::path::{generate_path, PathData};
use crate::proj::{FittedProjection, ProjectionKind};
use crate::route::{AIRPORTS, ROUTES};
use crate::tissot::indicatrix_features;

pub use svg::SvgSurface;

/// Horizontal offset of an airport label from its marker.
const LABEL_OFFSET: f64 = 8.0;

/// Paint attributes of a path or circle. `None` leaves the attribute unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Style {
    pub fill: Option<&'static str>,
    pub stroke: Option<&'static str>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub dash: Option<&'static str>,
}

/// Paint attributes of a text label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size: &'static str,
    pub font_weight: &'static str,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: &'static str,
    pub paint_order: &'static str,
}

pub const COUNTRY_STYLE: Style = Style {
    fill: Some("#f2f2f2"),
    stroke: Some("#999"),
    stroke_width: Some(0.4),
    opacity: None,
    dash: None,
};

pub const DATASET_POINT_STYLE: Style = Style {
    fill: Some("#3498db"),
    stroke: None,
    stroke_width: None,
    opacity: Some(0.6),
    dash: None,
};

pub const INDICATRIX_STYLE: Style = Style {
    fill: Some("rgba(255,0,0,0.12)"),
    stroke: Some("#ff0000"),
    stroke_width: Some(1.5),
    opacity: None,
    dash: Some("3,2"),
};

pub const AIRPORT_MARKER_STYLE: Style = Style {
    fill: Some("#e63946"),
    stroke: Some("white"),
    stroke_width: Some(1.5),
    opacity: None,
    dash: None,
};

pub const AIRPORT_LABEL_STYLE: TextStyle = TextStyle {
    font_size: "18px",
    font_weight: "700",
    fill: "#000",
    stroke: "#fff",
    stroke_width: "0.5px",
    paint_order: "stroke fill",
};

pub const DATASET_POINT_RADIUS: f64 = 2.0;
pub const AIRPORT_MARKER_RADIUS: f64 = 5.0;
pub const ROUTE_STROKE_WIDTH: f64 = 2.5;

fn route_style(color: &'static str) -> Style {
    Style {
        fill: Some("none"),
        stroke: Some(color),
        stroke_width: Some(ROUTE_STROKE_WIDTH),
        ..Style::default()
    }
}

/// One drawable element in viewport coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Path {
        class: &'static str,
        d: PathData,
        style: Style,
    },
    Circle {
        class: &'static str,
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    Text {
        class: &'static str,
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
    },
}

/// The layers, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Map,
    Dataset,
    Tissot,
    Route,
    Airport,
}

impl LayerKind {
    pub const ORDER: [LayerKind; 5] = [
        LayerKind::Map,
        LayerKind::Dataset,
        LayerKind::Tissot,
        LayerKind::Route,
        LayerKind::Airport,
    ];

    pub fn class(&self) -> &'static str {
        match self {
            Self::Map => "map-layer",
            Self::Dataset => "dataset-layer",
            Self::Tissot => "tissot-layer",
            Self::Route => "route-layer",
            Self::Airport => "airport-layer",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub primitives: Vec<Primitive>,
}

impl Layer {
    fn new(kind: LayerKind, primitives: Vec<Primitive>) -> Self {
        Self { kind, primitives }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Everything one render pass produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderOutput {
    pub projection: ProjectionKind,
    pub viewport: Viewport,
    /// Always one layer per [`LayerKind`], in [`LayerKind::ORDER`].
    pub layers: Vec<Layer>,
}

impl RenderOutput {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }
}

/// The external inputs of one render.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapState<'a> {
    pub projection: ProjectionKind,
    /// Loaded point dataset, `None` while loading or after a failed load.
    pub dataset: Option<&'a FeatureCollection>,
}

fn map_layer(boundary: &FeatureCollection, projection: &FittedProjection) -> Layer {
    let primitives = boundary
        .iter()
        .filter_map(|feature| generate_path(feature, projection))
        .map(|d| Primitive::Path {
            class: "country",
            d,
            style: COUNTRY_STYLE,
        })
        .collect();
    Layer::new(LayerKind::Map, primitives)
}

fn dataset_layer(
    dataset: Option<&FeatureCollection>,
    projection: &FittedProjection,
    viewport: Viewport,
) -> Layer {
    let primitives = dataset
        .map(|collection| {
            filter_points(collection, projection, viewport)
                .into_iter()
                .map(|p| Primitive::Circle {
                    class: "dataset-point",
                    cx: p.position.0,
                    cy: p.position.1,
                    r: DATASET_POINT_RADIUS,
                    style: DATASET_POINT_STYLE,
                })
                .collect()
        })
        .unwrap_or_default();
    Layer::new(LayerKind::Dataset, primitives)
}

fn tissot_layer(config: &RenderConfig, projection: &FittedProjection) -> Layer {
    let primitives = indicatrix_features(&config.grid, config.circle_segments)
        .iter()
        .filter_map(|feature| generate_path(feature, projection))
        .map(|d| Primitive::Path {
            class: "tissot-indicatrix",
            d,
            style: INDICATRIX_STYLE,
        })
        .collect();
    Layer::new(LayerKind::Tissot, primitives)
}

fn route_layer(config: &RenderConfig, projection: &FittedProjection) -> Layer {
    let primitives = ROUTES
        .iter()
        .filter_map(|route| {
            let d = generate_path(&route.to_feature(config.route_segments), projection)?;
            Some(Primitive::Path {
                class: "flight-route",
                d,
                style: route_style(route.color),
            })
        })
        .collect();
    Layer::new(LayerKind::Route, primitives)
}

fn airport_layer(projection: &FittedProjection) -> Layer {
    let mut primitives = Vec::with_capacity(AIRPORTS.len() * 2);
    for airport in &AIRPORTS {
        let Some((x, y)) = projection.project(airport.coords) else {
            continue;
        };
        primitives.push(Primitive::Circle {
            class: "airport-marker",
            cx: x,
            cy: y,
            r: AIRPORT_MARKER_RADIUS,
            style: AIRPORT_MARKER_STYLE,
        });
        primitives.push(Primitive::Text {
            class: "airport-label",
            x: x + LABEL_OFFSET,
            y,
            text: airport.code.to_string(),
            style: AIRPORT_LABEL_STYLE,
        });
    }
    Layer::new(LayerKind::Airport, primitives)
}

/// Render every layer for `state`, fitting the projection to `boundary`.
pub fn render(state: &MapState<'_>, boundary: &FeatureCollection, config: &RenderConfig) -> RenderOutput {
    let viewport = config.viewport;
    let projection = FittedProjection::fit(state.projection, viewport, boundary);

    let layers = LayerKind::ORDER
        .iter()
        .map(|kind| match kind {
            LayerKind::Map => map_layer(boundary, &projection),
            LayerKind::Dataset => dataset_layer(state.dataset, &projection, viewport),
            LayerKind::Tissot => tissot_layer(config, &projection),
            LayerKind::Route => route_layer(config, &projection),
            LayerKind::Airport => airport_layer(&projection),
        })
        .collect::<Vec<_>>();

    for layer in &layers {
        log::trace!("{} layer: {} primitives", layer.kind.class(), layer.len());
    }

    RenderOutput {
        projection: state.projection,
        viewport,
        layers,
    }
}

/// A drawing target that receives whole renders.
pub trait Surface {
    /// Remove everything previously drawn.
    fn clear(&mut self, viewport: Viewport);

    /// Draw one layer above all layers drawn since the last clear.
    fn draw_layer(&mut self, layer: &Layer);
}

/// Owns the map state and keeps a surface in sync with it.
///
/// Every state change clears the surface and redraws all layers.
pub struct Compositor<S: Surface> {
    boundary: FeatureCollection,
    config: RenderConfig,
    projection: ProjectionKind,
    dataset: DatasetSlot,
    surface: S,
}

impl<S: Surface> Compositor<S> {
    /// Create the compositor and draw the initial state (no dataset loaded).
    pub fn new(
        boundary: FeatureCollection,
        config: RenderConfig,
        projection: ProjectionKind,
        surface: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut compositor = Self {
            boundary,
            config,
            projection,
            dataset: DatasetSlot::new(),
            surface,
        };
        compositor.redraw();
        Ok(compositor)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn projection(&self) -> ProjectionKind {
        self.projection
    }

    pub fn dataset(&self) -> &DatasetSlot {
        &self.dataset
    }

    pub fn state(&self) -> MapState<'_> {
        MapState {
            projection: self.projection,
            dataset: self.dataset.data(),
        }
    }

    pub fn set_projection(&mut self, projection: ProjectionKind) {
        self.projection = projection;
        self.redraw();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        viewport.validate()?;
        self.config.viewport = viewport;
        self.redraw();
        Ok(())
    }

    /// Select a dataset; the dataset layer is empty until its load completes.
    pub fn select_dataset(&mut self, id: DatasetId) -> LoadTicket {
        let ticket = self.dataset.select(id);
        self.redraw();
        ticket
    }

    /// Deliver a finished load. Stale tickets are ignored without a redraw.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Option<FeatureCollection>) -> bool {
        let accepted = self.dataset.complete(ticket, result);
        if accepted {
            self.redraw();
        }
        accepted
    }

    /// Rebuild every layer from the current state and replace the surface contents.
    pub fn redraw(&mut self) -> RenderOutput {
        let output = render(&self.state(), &self.boundary, &self.config);
        self.surface.clear(output.viewport);
        for layer in &output.layers {
            self.surface.draw_layer(layer);
        }
        output
    }
}
