use crate::db::{init_db, Database};
use crate::responses::html_error_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod cache;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let db = Database::new("crm.sqlite3");

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    let addr: SocketAddr = match "127.0.0.1:3000".parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid bind address: {e}");
            std::process::exit(1);
        }
    };
    println!("Starting CRM at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &db) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
