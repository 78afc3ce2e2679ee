pub mod cancel;
pub mod count;
pub mod create;
pub mod events;
pub mod mine;
pub mod popular;
pub mod rsvp;
