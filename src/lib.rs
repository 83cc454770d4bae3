//! # sop-bdd: Binary Decision Diagrams from sum-of-products expressions
//!
//! **`sop-bdd`** builds reduced ordered Binary Decision Diagrams (BDDs) for boolean
//! functions written as sums of products, such as `AB+!C`, searches for a variable order
//! that keeps the diagram small, and evaluates the diagram on input assignments.
//!
//! ## What is a BDD?
//!
//! A Binary Decision Diagram represents a boolean function as a directed acyclic graph.
//! Each internal node tests one variable and has a low (0) and a high (1) child; leaves
//! carry the function value. For a fixed variable order, merging identical nodes and
//! dropping nodes whose children coincide gives a **canonical** diagram.
//!
//! ## Key Features
//!
//! - **One aggregate per diagram**: a [`Bdd`][crate::bdd::Bdd] owns its node arena,
//!   canonical node store, variable order and root. Diagrams share nothing.
//! - **Hash consing**: internal nodes are created through the store, so each
//!   `(variable, low, high)` triple exists at most once.
//! - **Explicit ownership**: nodes are reference counted and addressed by stable
//!   [`NodeId`][crate::reference::NodeId] indices; unreferenced nodes are reclaimed.
//! - **Order search**: a seeded randomized search over variable orders.
//!
//! ## Basic Usage
//!
//! ```rust
//! use sop_bdd::bdd::Bdd;
//!
//! // f = (A and B) or (not C), variables ordered A, B, C
//! let bdd = Bdd::build("AB+!C", "ABC").unwrap();
//!
//! // Assignments list one bit per variable, in order: A=1, B=0, C=1
//! assert_eq!(bdd.evaluate("101"), Ok(false));
//! assert_eq!(bdd.evaluate("100"), Ok(true));
//!
//! println!("{}", bdd.to_bracket_string(bdd.root().unwrap()));
//! bdd.release();
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: The diagram aggregate, node factory, Apply and reclamation.
//! - **[`builder`]**: Building diagrams from expressions.
//! - **[`reorder`]**: Variable-order search.
//! - **[`eval`]**: Evaluating a diagram on an assignment.
//! - **[`dot`]**: Utilities for visualizing diagrams using Graphviz.

pub mod ast;
pub mod bdd;
pub mod builder;
pub mod debug;
pub mod dot;
pub mod error;
pub mod eval;
pub mod node;
pub mod order;
pub mod reference;
pub mod reorder;
pub mod stats;
pub mod storage;
pub mod table;
pub mod types;
pub mod utils;
