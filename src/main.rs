// src/main.rs
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use serde::Deserialize;

use box_planner::config::EngineConfig;
use box_planner::engine::{PlacementEvent, place_with_observer};
use box_planner::model::{Container, Item};
use box_planner::types::Vec3;

/// Request structure for one placement run.
///
/// Read from the file named on the command line, or from stdin when no
/// argument is given. Items without an id get a generated `itemNNNN` id
/// based on their position in the request.
#[derive(Deserialize)]
struct PlacementRequest {
    space: Vec3,
    #[serde(default)]
    items: Vec<ItemRequest>,
}

/// One requested item; the id is optional on the wire.
#[derive(Deserialize)]
struct ItemRequest {
    #[serde(default)]
    id: Option<String>,
    name: String,
    dimensions: Vec3,
    #[serde(default)]
    face_up: bool,
    #[serde(default)]
    fragile: bool,
}

impl PlacementRequest {
    fn into_parts(self) -> (Container, Vec<Item>) {
        let container = Container { dims: self.space };
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, request)| {
                let id = match request.id {
                    Some(id) if !id.trim().is_empty() => id,
                    _ => format!("item{:04}", idx + 1),
                };
                Item::new(id, request.name, request.dimensions)
                    .with_face_up(request.face_up)
                    .with_fragile(request.fragile)
            })
            .collect();
        (container, items)
    }
}

fn read_request(path: Option<String>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> ExitCode {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("⚠️ Could not load .env: {}", err);
        }
    }

    let engine_config = EngineConfig::from_env();

    let raw = match read_request(env::args().nth(1)) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("❌ Could not read request: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let request: PlacementRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("❌ Could not parse request: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let (container, items) = request.into_parts();

    let result = match place_with_observer(
        &container,
        &items,
        engine_config.placement_config(),
        |event| {
            if let PlacementEvent::ItemRejected { id, reason_text, .. } = event {
                eprintln!("⚠️ Item '{}' not placed: {}", id, reason_text);
            }
        },
    ) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("❌ Invalid request: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("❌ Could not serialize result: {}", err);
            return ExitCode::FAILURE;
        }
    }

    if result.is_feasible() {
        eprintln!(
            "📦 Placed all {} items ({:.1}% utilization).",
            result.placed_count(),
            result.utilization_percent
        );
    } else {
        eprintln!(
            "📦 Placed {} of {} items; unplaced: {}.",
            result.placed_count(),
            result.placed_count() + result.unplaced_count(),
            result.unplaced_ids().join(", ")
        );
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_the_task_wire_format() {
        let json = r#"{
            "space": {"x": 10.0, "y": 10.0, "z": 10.0},
            "items": [
                {
                    "id": "item0001",
                    "name": "Monitor",
                    "dimensions": {"x": 6.0, "y": 4.0, "z": 1.0},
                    "face_up": true,
                    "fragile": true
                },
                {
                    "name": "Crate",
                    "dimensions": {"x": 4.0, "y": 4.0, "z": 4.0}
                }
            ]
        }"#;

        let request: PlacementRequest = serde_json::from_str(json).unwrap();
        let (container, items) = request.into_parts();

        assert_eq!(container.dims, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "item0001");
        assert!(items[0].face_up && items[0].fragile);
        assert_eq!(items[1].id, "item0002");
        assert_eq!(items[1].name, "Crate");
        assert!(!items[1].face_up && !items[1].fragile);
    }

    #[test]
    fn blank_ids_are_replaced_by_generated_ones() {
        let json = r#"{
            "space": {"x": 5.0, "y": 5.0, "z": 5.0},
            "items": [
                {"id": "   ", "name": "A", "dimensions": {"x": 1.0, "y": 1.0, "z": 1.0}},
                {"id": "custom", "name": "B", "dimensions": {"x": 1.0, "y": 1.0, "z": 1.0}}
            ]
        }"#;

        let request: PlacementRequest = serde_json::from_str(json).unwrap();
        let (_, items) = request.into_parts();
        assert_eq!(items[0].id, "item0001");
        assert_eq!(items[1].id, "custom");
    }

    #[test]
    fn missing_items_field_means_empty_run() {
        let json = r#"{"space": {"x": 5.0, "y": 5.0, "z": 5.0}}"#;
        let request: PlacementRequest = serde_json::from_str(json).unwrap();
        let (_, items) = request.into_parts();
        assert!(items.is_empty());
    }
}
