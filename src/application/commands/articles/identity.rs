use crate::application::{
    dto::Identity,
    error::{ApplicationError, ApplicationResult},
};

pub(super) fn ensure_master(actor: &Identity) -> ApplicationResult<()> {
    if actor.is_master() {
        Ok(())
    } else {
        Err(ApplicationError::unauthorized("master access only"))
    }
}

pub(super) fn ensure_authenticated(actor: &Identity) -> ApplicationResult<()> {
    if actor.is_anonymous() {
        Err(ApplicationError::unauthorized("authentication required"))
    } else {
        Ok(())
    }
}
