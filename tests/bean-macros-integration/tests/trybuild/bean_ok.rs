use bean_macros::Bean;
use ioc_common::{BeanType, Injected};
use std::sync::Arc;

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Bean, Default)]
#[bean(component, exposes = dyn Clock)]
struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        42
    }
}

#[derive(Bean, Default)]
#[bean(component = "scheduler", name = "jobs::Scheduler")]
struct Scheduler {
    #[inject]
    #[property]
    clock: Injected<dyn Clock>,
}

fn main() {
    let descriptor = Scheduler::descriptor();
    assert_eq!(descriptor.name(), "jobs::Scheduler");
    assert_eq!(descriptor.component_id(), "scheduler");
    assert_eq!(descriptor.injections().len(), 1);
    assert!(descriptor.find_setter("Clock").is_some());

    let clock = FixedClock::descriptor().instantiate().unwrap();
    let clock: Arc<dyn Clock> = clock.capability::<dyn Clock>().unwrap();
    assert_eq!(clock.now(), 42);
}
