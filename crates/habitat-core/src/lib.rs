//! Habitat Core -- the per-vessel life-support resource simulation.
//!
//! This crate provides the resource ledger, the proportional recipe
//! executor, the per-vessel cache that batches both, and the registry
//! that tracks one cache per vessel. On top of that sit the content
//! primitives every life-support system is assembled from: crew rules,
//! converters, and environment modifiers.
//!
//! # Three-Phase Tick
//!
//! Everything in a simulated tick funnels through [`cache::VesselResources`]:
//!
//! 1. **Collect** -- producers and consumers record deferred deltas via
//!    `produce`/`consume`, or queue whole conversions via `transform`.
//!    Nothing is validated or committed yet.
//! 2. **Resolve** -- at the tick boundary, `sync` runs every queued
//!    [`recipe::Recipe`] to a fixed point: recipes that feed each other
//!    settle without an explicit dependency graph, and under-supplied
//!    recipes execute partially in proportion to what is available.
//! 3. **Commit** -- each [`ledger::ResourceLedger`] distributes its
//!    accumulated delta across the vessel's containers (respecting every
//!    container's own bounds) and recomputes the observed rate.
//!
//! # Key Types
//!
//! - [`ledger::ResourceLedger`] -- amount/capacity/rate state for one
//!   resource on one vessel, with deferred-delta accumulation.
//! - [`recipe::Recipe`] -- an N-inputs, M-outputs conversion with
//!   proportional-shortfall semantics.
//! - [`cache::VesselResources`] -- all ledgers and pending recipes of
//!   one vessel; owns the fixed-point resolution loop.
//! - [`registry::ResourceRegistry`] -- vessel identity to cache map,
//!   held by the orchestrator (no ambient statics).
//! - [`storage::Storage`] -- the boundary to the host's per-part
//!   container state; [`storage::PartStorage`] is the in-memory
//!   reference implementation.
//! - [`rule::Rule`] -- continuous or interval-based crew draw.
//! - [`converter::Converter`] -- scrubber / recycler / greenhouse /
//!   harvester variants, each contributing a recipe per tick.
//! - [`modifier::Modifier`] -- environment scaling factors for rules.

pub mod cache;
pub mod converter;
pub mod id;
pub mod ledger;
pub mod modifier;
pub mod recipe;
pub mod registry;
pub mod rule;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
