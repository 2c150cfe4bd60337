//! __splitcone__ is a Rust implementation of a first-order operator-splitting
//! solver for convex cone programs.  It solves the following problem:
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & c^T x\\\\\[2ex\]
//!  \text{subject to} & Ax + s = b \\\\\[1ex\]
//!         & s \in \mathcal{K}
//!  \end{array}
//! $$
//!
//! with decision variables
//! $x \in \mathbb{R}^n$,
//! $s \in \mathbb{R}^m$
//! and data
//! $c \in \mathbb{R}^n$,
//! $A \in \mathbb{R}^{m \times n}$, and
//! $b \in \mathbb{R}^m$.
//! The convex set $\mathcal{K}$ is a composition of convex cones: the zero
//! cone, the nonnegative orthant, second-order cones, and exponential cones
//! and their duals.
//!
//! The solver works on a homogeneous self-dual embedding of the problem's
//! optimality conditions, alternating a projection onto an affine subspace
//! (one sparse linear solve) with a projection onto the cone product.  A
//! single embedding handles optimality, primal infeasibility and dual
//! unboundedness at once, so infeasible and unbounded problems terminate
//! with certificates rather than diverging.
//!
//! ## Features
//!
//! * __Matrix-free friendly__: the affine step is served by either a sparse
//!   direct LDLᵀ factorization (computed once per solve) or a warm-started
//!   conjugate-gradient method that only needs matrix-vector products.
//!
//! * __Certificates__: primal infeasibility and dual unboundedness are
//!   detected through the embedding and reported with certificate vectors.
//!
//! * __Equilibration__: problem data is rescaled by cone-aware diagonal
//!   equilibration before solving and all reported quantities are mapped
//!   back to the original data scaling.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod ldl;
pub mod solver;
pub mod timers;
