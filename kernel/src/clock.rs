use time::PrimitiveDateTime;

/// Source of "now" for every time-relative rule: temporal listing states,
/// last/next booking lookup and comment eligibility.
pub trait Clock: 'static + Sync + Send {
    fn now(&self) -> PrimitiveDateTime;
}

pub trait DependOnClock: 'static + Sync + Send {
    type Clock: Clock;
    fn clock(&self) -> &Self::Clock;
}
