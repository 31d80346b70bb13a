//! Map handlers.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, WebSocketUpgrade,
    },
    response::Response,
    Extension, Json,
};
use common::{
    geo::{Bounds, Zoom},
    Area, Price,
};
use futures::FutureExt as _;
use rust_decimal::Decimal;
use serde::Deserialize;
use service::{
    query,
    read::{listing::list, viewport::Selector},
    viewport, Query as _,
};
use tracing as log;

use crate::{AsError as _, Error, Service};

use super::FilterError;

/// Query parameters describing a map viewport.
///
/// The same shape arrives as `GET /api/map` query parameters and as JSON
/// messages of the [`feed`] socket.
#[derive(Debug, Deserialize)]
pub struct Params {
    /// Northern edge latitude of the viewport.
    pub north: f64,

    /// Southern edge latitude of the viewport.
    pub south: f64,

    /// Eastern edge longitude of the viewport.
    pub east: f64,

    /// Western edge longitude of the viewport.
    pub west: f64,

    /// Zoom level of the viewport.
    pub zoom: u8,

    /// ID of the district the plots should belong to.
    #[serde(default)]
    pub district: Option<i64>,

    /// Comma-joined IDs of the settlements the plots should belong to any
    /// of.
    #[serde(default)]
    pub settlements: Option<String>,

    /// ID of the land use category of the plots.
    #[serde(default)]
    pub land_use: Option<i64>,

    /// Lowest acceptable price, in rubles.
    #[serde(default)]
    pub price_min: Option<Decimal>,

    /// Highest acceptable price, in rubles.
    #[serde(default)]
    pub price_max: Option<Decimal>,

    /// Smallest acceptable area, in square meters.
    #[serde(default)]
    pub area_min: Option<Decimal>,

    /// Largest acceptable area, in square meters.
    #[serde(default)]
    pub area_max: Option<Decimal>,
}

impl Params {
    /// Converts these [`Params`] into a viewport [`Selector`].
    fn selector(self) -> Option<Selector> {
        Some(Selector {
            bounds: Bounds::new(self.north, self.south, self.east, self.west)?,
            zoom: Zoom::new(self.zoom)?,
            filter: list::Filter {
                district_id: self.district.map(Into::into),
                settlements: super::settlement_ids(
                    self.settlements.as_deref(),
                )?,
                land_use_id: self.land_use.map(Into::into),
                price_min: super::bound(self.price_min, Price::new)?,
                price_max: super::bound(self.price_max, Price::new)?,
                area_min: super::bound(self.area_min, Area::new)?,
                area_max: super::bound(self.area_max, Area::new)?,
            },
        })
    }
}

/// `GET /api/map`
///
/// Serves the contents of the requested viewport in display form: cluster
/// markers below the clustering zoom threshold, individual plot markers at
/// it and above.
pub async fn viewport(
    Extension(service): Extension<Service>,
    Query(params): Query<Params>,
) -> Result<Json<viewport::View>, Error> {
    let selector = params.selector().ok_or(FilterError::Malformed)?;
    service
        .execute(query::viewport::Contents::by(selector))
        .await
        .map(|page| Json(viewport::View::from(page)))
        .map_err(|e| e.into_error())
}

/// `GET /ws/map`
///
/// Upgrades the connection into a WebSocket map feed: inbound messages are
/// JSON [`Params`] describing viewport changes, outbound messages are the
/// [`viewport::View`] to display.
pub async fn feed(
    ws: WebSocketUpgrade,
    Extension(service): Extension<Service>,
) -> Response {
    ws.on_upgrade(move |socket| connection(socket, service))
}

/// Serves one map feed connection.
///
/// Each connection owns its [`viewport::Loader`], so the debounce and
/// supersede discipline applies per client. Dropping the loader on
/// disconnect cancels whatever load is still pending.
async fn connection(mut socket: WebSocket, service: Service) {
    let config = service.config().viewport;
    let loader = viewport::Loader::new(config, move |selector| {
        let service = service.clone();
        async move {
            service.execute(query::viewport::Contents::by(selector)).await
        }
        .boxed()
    });
    let mut view = loader.subscribe();

    loop {
        tokio::select! {
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                // The `watch::Ref` guard is held across no `.await`.
                let msg = {
                    let view = view.borrow_and_update();
                    serde_json::to_string(&*view)
                };
                match msg {
                    Ok(msg) => {
                        if socket.send(Message::Text(msg)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("failed to serialize viewport view: {e}");
                    }
                }
            }
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Text(raw))) => {
                        match serde_json::from_str::<Params>(&raw)
                            .ok()
                            .and_then(Params::selector)
                        {
                            Some(selector) => loader.request(selector),
                            None => {
                                log::debug!("malformed viewport message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(
                        Message::Binary(_)
                        | Message::Ping(_)
                        | Message::Pong(_),
                    )) => {}
                    Some(Err(e)) => {
                        log::debug!("map feed socket failed: {e}");
                        break;
                    }
                }
            }
        }
    }
}
