//! Fuzz target for page protocol decoding and the server's datagram handler.

#![no_main]

use libfuzzer_sys::fuzz_target;
use six502::protocol::Message;
use six502::PageServer;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = Message::decode(data) {
        // Anything that decodes must re-encode to the same bytes
        assert_eq!(message.encode(), data);
    }

    let mut server = match PageServer::new(1, 255) {
        Ok(server) => server,
        Err(_) => return,
    };
    if let Some(reply) = server.handle_datagram(data) {
        assert_eq!(reply.len(), 258);
    }
});
