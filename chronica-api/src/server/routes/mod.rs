use crate::server::ServerRouter;

mod blogs;
mod contact;

pub fn routes() -> ServerRouter {
    blogs::routes().merge(contact::routes())
}
