//! A library for appending polygonal surface meshes into a single combined mesh.
//!
//! # Overview
//!
//! This library concatenates any number of independently produced polygonal meshes
//! into one renderable dataset. Point coordinates and all four cell categories
//! (vertices, lines, polygons, triangle strips) are appended with correct index
//! renumbering, while per-point attributes (scalars, vectors, normals, texture
//! coordinates, tensors) are appended only when every input supplies them with a
//! matching component width.
//!
//! The [`pipeline::Appender`] filter wraps the core [`algo::append_all`] function
//! with an ordered input list and an optional parallel-streaming mode, where each
//! input is asked to produce a distinct piece of a logically unified dataset so
//! that upstream producers can run concurrently.

pub mod algo;
pub mod mesh;
pub mod pipeline;

// public re-exports
pub use crate::algo::append::{append_all, common_point_attributes};
pub use crate::mesh::*;
pub use crate::pipeline::{assign_piece, Appender, PieceRequest, PolyDataSource};

/// Plain old data trait. Types that implement this trait contain no references and can be copied
/// with `memcpy`. The additional `Any` trait lets us inspect the type more easily.
pub trait Pod: 'static + Copy + Sized + Send + Sync + std::any::Any {}
impl<T> Pod for T where T: 'static + Copy + Sized + Send + Sync + std::any::Any {}

pub trait Real:
    math::ComplexField + num_traits::Float + ::std::fmt::Debug + std::iter::Sum + Pod
{
}
impl<T> Real for T where
    T: math::ComplexField + num_traits::Float + ::std::fmt::Debug + std::iter::Sum + Pod
{
}
