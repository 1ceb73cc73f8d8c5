// Domain layer: course models and the ports to the fetch provider, render sink and storage.

pub mod model;
pub mod ports;
