//! Fallback backend for platforms without a brightness query. The
//! capability never binds and the registry has no display services.

use std::iter;

use crate::{
    BrightnessQuery, CapabilityProvider, DisplayId, DisplayService,
    QueryError, ServiceRegistry,
};

pub struct Unavailable;

pub enum NoQuery {}

impl BrightnessQuery for NoQuery {
    fn query(&self, _display: DisplayId) -> Result<f32, QueryError> {
        match *self {}
    }
}

pub enum NoService {}

impl DisplayService for NoService {
    fn brightness(&self) -> Result<f32, QueryError> {
        match *self {}
    }
}

impl CapabilityProvider for Unavailable {
    type Query = NoQuery;

    fn bind(&self) -> Result<NoQuery, QueryError> {
        Err(QueryError::Unsupported)
    }

    fn primary_display(&self) -> DisplayId {
        0
    }
}

impl ServiceRegistry for Unavailable {
    type Service = NoService;
    type Services = iter::Empty<NoService>;

    fn display_services(&self) -> Result<Self::Services, QueryError> {
        Ok(iter::empty())
    }
}

pub fn capability_provider() -> Unavailable {
    Unavailable
}

pub fn service_registry() -> Unavailable {
    Unavailable
}
