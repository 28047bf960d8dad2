//! Static map rendering for computed route plans.
//!
//! Writes a self-contained Leaflet page per plan into the served static
//! directory, the same artifact shape the frontend embeds in an iframe.
//! Rendering is strictly presentational: a failure here never invalidates
//! the numeric plan.

use std::fs;
use std::path::PathBuf;

use refuel_core::providers::{MapRenderer, RenderError};
use refuel_core::{FuelStop, Polyline, StopKind};
use uuid::Uuid;

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Fuel route</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
  <div id="map"></div>
  <script>
    var route = __ROUTE__;
    var stops = __STOPS__;
    var map = L.map('map').setView(route[0], 5);
    L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);
    L.polyline(route, { color: 'blue' }).addTo(map);
    stops.forEach(function (stop) {
      L.marker([stop.lat, stop.lon]).addTo(map).bindPopup('$' + stop.price);
    });
  </script>
</body>
</html>
"#;

/// Renders route maps as static Leaflet HTML files.
pub struct HtmlMapRenderer {
    static_dir: PathBuf,
}

impl HtmlMapRenderer {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
        }
    }
}

impl MapRenderer for HtmlMapRenderer {
    fn render(&self, polyline: &Polyline, stops: &[FuelStop]) -> Result<String, RenderError> {
        let route: Vec<[f64; 2]> = polyline
            .points()
            .iter()
            .map(|point| [point.lat, point.lon])
            .collect();
        if route.is_empty() {
            return Err(RenderError::Render("empty polyline".to_string()));
        }

        let markers: Vec<serde_json::Value> = stops
            .iter()
            .filter(|stop| stop.kind == StopKind::Refuel)
            .map(|stop| {
                serde_json::json!({
                    "lat": stop.location.lat,
                    "lon": stop.location.lon,
                    "price": stop.price_per_gallon.unwrap_or_default(),
                })
            })
            .collect();

        let route_json = serde_json::to_string(&route)
            .map_err(|err| RenderError::Render(err.to_string()))?;
        let stops_json = serde_json::to_string(&markers)
            .map_err(|err| RenderError::Render(err.to_string()))?;
        let html = MAP_TEMPLATE
            .replace("__ROUTE__", &route_json)
            .replace("__STOPS__", &stops_json);

        let map_id = Uuid::new_v4().simple().to_string();
        let file_name = format!("route_map_{}.html", &map_id[..8]);

        fs::create_dir_all(&self.static_dir)
            .map_err(|err| RenderError::Render(err.to_string()))?;
        fs::write(self.static_dir.join(&file_name), html)
            .map_err(|err| RenderError::Render(err.to_string()))?;

        Ok(format!("/static/{}", file_name))
    }
}
