/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// User-facing error surface shared with the display layer
pub mod error_state;
/// API client with verb helpers and failure classification
pub mod http;
/// Per-call request overrides
pub mod options;
/// Outgoing request stage
pub mod request;
/// Incoming response stage
pub mod response;
