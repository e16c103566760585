//! SMTP delivery of the finished notification message.
//!
//! Thin pass-through over lettre's blocking transport: build the message,
//! open one connection, send once. No retry; a pipeline step timeout
//! governs cancellation from outside.

use std::fs;
use std::path::PathBuf;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::{Error, Result};
use crate::utils::parser;

/// Characters accepted between addresses in a recipient list input.
const ADDRESS_SEPARATORS: &[&str] = &[";", ","];

/// Final field values handed over by the orchestrator.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachment: Option<PathBuf>,
}

/// SMTP server coordinates from the task input.
#[derive(Debug, Clone)]
pub struct SmtpServer {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl: bool,
}

/// Split a `;`/`,`-delimited address list into individual addresses.
pub fn split_addresses(list: &str) -> Vec<String> {
    parser::split_tokens(list, ADDRESS_SEPARATORS)
}

fn parse_mailbox(field: &str, address: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| Error::invalid_argument(field, format!("'{}': {}", address, e)))
}

/// Build the RFC 5322 message for an envelope.
///
/// Plain-text body; multipart with an octet-stream attachment part when
/// an attachment path is configured.
pub fn build_message(envelope: &Envelope) -> Result<Message> {
    if envelope.to.is_empty() {
        return Err(Error::invalid_argument(
            "to",
            "at least one recipient is required",
        ));
    }

    let mut builder = Message::builder()
        .from(parse_mailbox("from", &envelope.from)?)
        .subject(envelope.subject.clone());

    for address in &envelope.to {
        builder = builder.to(parse_mailbox("to", address)?);
    }
    for address in &envelope.cc {
        builder = builder.cc(parse_mailbox("cc", address)?);
    }
    for address in &envelope.bcc {
        builder = builder.bcc(parse_mailbox("bcc", address)?);
    }

    let message = match &envelope.attachment {
        Some(path) => {
            let content = fs::read(path)?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "attachment".to_string());
            let content_type = ContentType::parse("application/octet-stream")
                .map_err(|e| Error::Other(e.to_string()))?;

            builder.multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(envelope.body.clone()))
                    .singlepart(Attachment::new(filename).body(content, content_type)),
            )
        }
        None => builder.body(envelope.body.clone()),
    }
    .map_err(|e| Error::Smtp(format!("Failed to build message: {}", e)))?;

    Ok(message)
}

fn build_transport(server: &SmtpServer) -> Result<SmtpTransport> {
    let mut builder = if server.ssl {
        SmtpTransport::relay(&server.host)
            .map_err(|e| Error::Smtp(format!("SMTP connection setup failed: {}", e)))?
    } else {
        SmtpTransport::builder_dangerous(&server.host)
    };

    builder = builder.port(server.port);

    if let (Some(username), Some(password)) = (&server.username, &server.password) {
        builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
    }

    Ok(builder.build())
}

/// Deliver the envelope. One attempt; transport failures map to
/// [`Error::Smtp`].
pub fn send(envelope: &Envelope, server: &SmtpServer) -> Result<()> {
    let message = build_message(envelope)?;
    let transport = build_transport(server)?;

    transport
        .send(&message)
        .map_err(|e| Error::Smtp(e.to_string()))?;

    Ok(())
}
