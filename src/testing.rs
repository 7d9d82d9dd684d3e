//! Test doubles for both strategies. Each double writes what happened to it
//! into a shared ledger so tests can check queries and releases.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use crate::{
    BrightnessQuery, CapabilityProvider, DisplayId, DisplayService,
    QueryError, ServiceRegistry,
};

#[derive(Debug, Default)]
pub struct CapabilityLedger {
    pub binds: Cell<usize>,
    pub queried_displays: RefCell<Vec<DisplayId>>,
    pub releases: Cell<usize>,
}

pub struct FakeProvider {
    query: Option<Result<f32, QueryError>>,
    display: DisplayId,
    pub ledger: Rc<CapabilityLedger>,
}

impl FakeProvider {
    pub fn unbound() -> FakeProvider {
        FakeProvider {
            query: None,
            display: 1,
            ledger: Rc::default(),
        }
    }

    pub fn bound(result: Result<f32, QueryError>) -> FakeProvider {
        FakeProvider {
            query: Some(result),
            ..FakeProvider::unbound()
        }
    }

    pub fn with_display(mut self, display: DisplayId) -> FakeProvider {
        self.display = display;
        self
    }
}

impl CapabilityProvider for FakeProvider {
    type Query = FakeQuery;

    fn bind(&self) -> Result<FakeQuery, QueryError> {
        self.ledger.binds.set(self.ledger.binds.get() + 1);
        match &self.query {
            Some(result) => Ok(FakeQuery {
                result: result.clone(),
                ledger: Rc::clone(&self.ledger),
            }),
            None => Err(QueryError::CapabilityUnavailable(
                "no such library".to_owned(),
            )),
        }
    }

    fn primary_display(&self) -> DisplayId {
        self.display
    }
}

pub struct FakeQuery {
    result: Result<f32, QueryError>,
    ledger: Rc<CapabilityLedger>,
}

impl BrightnessQuery for FakeQuery {
    fn query(&self, display: DisplayId) -> Result<f32, QueryError> {
        self.ledger.queried_displays.borrow_mut().push(display);
        self.result.clone()
    }
}

impl Drop for FakeQuery {
    fn drop(&mut self) {
        self.ledger.releases.set(self.ledger.releases.get() + 1);
    }
}

#[derive(Debug, Default)]
pub struct RegistryLedger {
    pub enumerations: Cell<usize>,
    pub queried: RefCell<Vec<usize>>,
    pub released: RefCell<Vec<usize>>,
    pub iterator_releases: Cell<usize>,
}

/// A registry whose services answer with the given results, in order.
pub struct FakeRegistry {
    services: Result<Vec<Result<f32, QueryError>>, QueryError>,
    pub ledger: Rc<RegistryLedger>,
}

impl FakeRegistry {
    pub fn new(services: Vec<Result<f32, QueryError>>) -> FakeRegistry {
        FakeRegistry {
            services: Ok(services),
            ledger: Rc::default(),
        }
    }

    pub fn failing(status: i32) -> FakeRegistry {
        FakeRegistry {
            services: Err(QueryError::Registry(status)),
            ledger: Rc::default(),
        }
    }
}

impl ServiceRegistry for FakeRegistry {
    type Service = FakeService;
    type Services = FakeServices;

    fn display_services(&self) -> Result<FakeServices, QueryError> {
        self.ledger
            .enumerations
            .set(self.ledger.enumerations.get() + 1);
        let services = self.services.clone()?;
        Ok(FakeServices {
            pending: services.into_iter().enumerate().collect(),
            ledger: Rc::clone(&self.ledger),
        })
    }
}

pub struct FakeServices {
    pending: VecDeque<(usize, Result<f32, QueryError>)>,
    ledger: Rc<RegistryLedger>,
}

impl Iterator for FakeServices {
    type Item = FakeService;

    fn next(&mut self) -> Option<FakeService> {
        let (index, result) = self.pending.pop_front()?;
        Some(FakeService {
            index,
            result,
            ledger: Rc::clone(&self.ledger),
        })
    }
}

impl Drop for FakeServices {
    fn drop(&mut self) {
        self.ledger
            .iterator_releases
            .set(self.ledger.iterator_releases.get() + 1);
    }
}

pub struct FakeService {
    index: usize,
    result: Result<f32, QueryError>,
    ledger: Rc<RegistryLedger>,
}

impl DisplayService for FakeService {
    fn brightness(&self) -> Result<f32, QueryError> {
        self.ledger.queried.borrow_mut().push(self.index);
        self.result.clone()
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.ledger.released.borrow_mut().push(self.index);
    }
}

/// A registry that fails the test if anything enumerates it.
pub struct UntouchableRegistry;

impl ServiceRegistry for UntouchableRegistry {
    type Service = FakeService;
    type Services = FakeServices;

    fn display_services(&self) -> Result<FakeServices, QueryError> {
        panic!("the registry must not be consulted");
    }
}
