//! TCP client for the seating service

use std::net::SocketAddr;

use tokio::net::TcpStream;
use tracing::{debug, info};
use uuid::Uuid;

use seatwise_core::{ExamSeatingRecord, SeatingDraft, SeatingRecordSummary};

use crate::error::{Error, Result};
use crate::frame::{read_frame, write_frame};
use crate::protocol::{Request, Response};

/// Client handle; one request in flight at a time
pub struct Client {
    stream: TcpStream,
    addr: SocketAddr,
}

impl Client {
    /// Connect to a seating server
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        info!(addr = %addr, "Connected to server");
        Ok(Self { stream, addr })
    }

    /// Address of the connected server
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Send a request and wait for its response.
    ///
    /// Server-side failures come back as `Error::Remote`.
    pub async fn request(&mut self, request: &Request) -> Result<Response> {
        debug!(request = request.kind(), "Sending request");
        write_frame(&mut self.stream, request).await?;
        match read_frame(&mut self.stream).await? {
            Response::Error { code, message } => Err(Error::Remote { code, message }),
            response => Ok(response),
        }
    }

    /// Generate and store a seating arrangement
    pub async fn generate(&mut self, draft: SeatingDraft) -> Result<ExamSeatingRecord> {
        match self.request(&Request::Generate { draft }).await? {
            Response::Generated { record } => Ok(*record),
            other => Err(unexpected(&other)),
        }
    }

    /// List stored arrangements, newest first
    pub async fn list(&mut self) -> Result<Vec<SeatingRecordSummary>> {
        match self.request(&Request::List).await? {
            Response::Records { records } => Ok(records),
            other => Err(unexpected(&other)),
        }
    }

    /// Fetch one stored arrangement
    pub async fn get(&mut self, id: Uuid) -> Result<ExamSeatingRecord> {
        match self.request(&Request::Get { id }).await? {
            Response::Record { record } => Ok(*record),
            other => Err(unexpected(&other)),
        }
    }

    /// Delete one stored arrangement
    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        match self.request(&Request::Delete { id }).await? {
            Response::Deleted { .. } => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    /// Liveness check
    pub async fn ping(&mut self) -> Result<()> {
        match self.request(&Request::Ping).await? {
            Response::Pong => Ok(()),
            other => Err(unexpected(&other)),
        }
    }
}

fn unexpected(response: &Response) -> Error {
    Error::Protocol(format!("Unexpected response: {:?}", response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::Server;
    use chrono::NaiveDate;
    use seatwise_core::{Database, Hall, Student, Teacher};
    use std::sync::{Arc, Mutex};

    fn seeded_db() -> Arc<Mutex<Database>> {
        let db = Database::open_in_memory().unwrap();
        let mut students: Vec<Student> = (1..=20)
            .map(|i| Student::new(format!("a{}", i), format!("A{}", i), "10A"))
            .collect();
        students.extend((1..=15).map(|i| Student::new(format!("b{}", i), format!("B{}", i), "10B")));
        db.directory()
            .import(
                &students,
                &[Teacher::new("t1", "Ms. Adams"), Teacher::new("t2", "Mr. Baker")],
            )
            .unwrap();
        Arc::new(Mutex::new(db))
    }

    fn draft(halls: Vec<Hall>) -> SeatingDraft {
        SeatingDraft::new("Finals", NaiveDate::from_ymd_opt(2026, 12, 10).unwrap())
            .with_classes(["10A", "10B"])
            .with_halls(halls)
    }

    async fn start() -> (Server, Client) {
        let server = Server::start("127.0.0.1:0".parse().unwrap(), seeded_db())
            .await
            .unwrap();
        let client = Client::connect(server.addr()).await.unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_generate_list_get_delete() {
        let (server, mut client) = start().await;
        client.ping().await.unwrap();

        let record = client
            .generate(draft(vec![Hall::new("Hall 1", 20, 5), Hall::new("Hall 2", 20, 5)]))
            .await
            .unwrap();
        assert_eq!(record.total_students, 35);
        assert_eq!(record.exam_halls[1].total_students, 15);

        let list = client.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, record.id);

        let fetched = client.get(record.id).await.unwrap();
        assert_eq!(fetched.exam_halls, record.exam_halls);

        client.delete(record.id).await.unwrap();
        let err = client.get(record.id).await.unwrap_err();
        assert_eq!(err.remote_code(), Some("not_found"));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_validation_error_is_remote() {
        let (server, mut client) = start().await;

        let err = client
            .generate(draft(vec![Hall::new("Small", 10, 2), Hall::new("Tiny", 10, 2)]))
            .await
            .unwrap_err();
        assert_eq!(err.remote_code(), Some("insufficient_capacity"));

        // Connection stays usable after an error response
        assert!(client.list().await.unwrap().is_empty());
        server.shutdown();
    }

    #[tokio::test]
    async fn test_undecodable_request_gets_error_response() {
        let (server, mut client) = start().await;

        let payload = b"{\"type\":\"Teleport\"}";
        let mut bytes = (payload.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(payload);
        tokio::io::AsyncWriteExt::write_all(&mut client.stream, &bytes)
            .await
            .unwrap();
        let response: Response = read_frame(&mut client.stream).await.unwrap();
        assert!(matches!(response, Response::Error { ref code, .. } if code == "bad_request"));

        client.ping().await.unwrap();
        server.shutdown();
    }
}
