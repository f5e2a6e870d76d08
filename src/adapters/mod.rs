// Adapters layer: raw API payloads in, typed domain records out.

pub mod json;
