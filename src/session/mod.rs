/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// Navigation facility and route guard
pub mod navigation;
/// Anti-forgery token sources
pub mod page;
/// Persisted session store
pub mod store;
