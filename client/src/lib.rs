//! Client for the Para backend server.
//!
//! Every call is authenticated in one of three ways:
//!
//! - signed with the app's secret key, see [`para_v4::RequestSigner`]
//! - as a user, with the JWT obtained from [`Client::sign_in`]
//! - anonymously, when no secret key is configured
//!
//! ## Example
//!
//! ```no_run
//! use para_client::{Client, Config, ParaObject};
//! use para_core::{Context, OsEnv};
//! use para_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> para_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let client = Client::new(ctx.clone(), Config::default().from_env(&ctx));
//!
//! let mut dog = ParaObject::new("", "dog");
//! dog.name = "Rex".to_string();
//! let dog = client.create(&dog).await?;
//! # Ok(())
//! # }
//! ```
//!
//! A 404 from the server is not an error: reads return `Ok(None)`, lists
//! return an empty [`Page`].

mod api;

mod client;
pub use client::{Client, JWT_PATH};

mod config;
pub use config::*;

mod constraint;
pub use constraint::Constraint;

mod dispatch;
pub use dispatch::{Dispatcher, Invocation, ParamValue, Params, Reply, Secret};

mod object;
pub use object::{ParaObject, CORE_FIELDS};

mod pager;
pub use pager::{Page, Pager};

mod session;
pub use session::{
    Token, TokenStatus, TOKEN_EXPIRES_KEY, TOKEN_KEY, TOKEN_NEXT_REFRESH_KEY,
};
