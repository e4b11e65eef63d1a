//! PostgREST adapter - the hosted table API behind the record store ports.
//!
//! Speaks the Supabase REST dialect: `select=*` reads, single-row inserts
//! with `Prefer: return=representation`, and `id=eq.{id}` filtered deletes.

mod client;

pub use client::{PostgrestClient, PostgrestConfig};
