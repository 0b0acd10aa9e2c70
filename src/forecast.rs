pub mod controller;
pub mod dataset;
pub mod estimator;
pub mod model;
pub mod predictor;
pub mod repository;
pub mod service;
