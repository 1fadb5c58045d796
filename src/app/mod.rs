//! Application layer with dependency injection container.
//!
//! The container owns the value-table source and builds engines from an
//! `EngineConfig`, following hexagonal architecture principles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │         App (DI Container)           │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                       │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - EmbeddedTable                     │   │
//! │  │  - JsonFileTable                     │   │
//! │  │  - InMemoryTable (testing)           │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                 │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - TableSource trait                 │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ used by                    │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Logic (wizard)               │   │
//! │  │  - Engine                            │   │
//! │  │  - MoveEvaluator, FailureGuard       │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use piscari::app::{App, EngineConfig};
//! use piscari::game::{Board, Color, Icon};
//!
//! let app = App::new();
//! let mut engine = app.create_ready_engine(EngineConfig::new().with_seed(42))?;
//! let cell = engine.select_best_move_on(&Board::new(), Icon::Fly, Color::Red);
//! assert!(cell.is_some());
//! # Ok::<(), piscari::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::EngineConfig;
pub use container::{App, AppBuilder};
