//! Frame codec for `tokio_util::codec`
//!
//! Encodes [`CommandFrame`]s for the socket's write half. The decoder is the
//! server's view of the same stream and is used by tests and tools that need
//! to read client traffic.

use bytes::BytesMut;
use rpgclient_core::{ClientError, Result};
use rpgclient_protocol::CommandFrame;
use tokio_util::codec::{Decoder, Encoder};

#[derive(Debug, Clone, Copy)]
pub struct CommandCodec {
    max_payload: usize,
}

impl CommandCodec {
    pub fn new(max_payload: usize) -> Self {
        Self { max_payload }
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }
}

impl Default for CommandCodec {
    fn default() -> Self {
        Self::new(0xFFFF)
    }
}

impl Encoder<CommandFrame> for CommandCodec {
    type Error = ClientError;

    fn encode(&mut self, frame: CommandFrame, dst: &mut BytesMut) -> Result<()> {
        if frame.payload.len() > self.max_payload {
            return Err(ClientError::Protocol(format!(
                "Frame payload of {} bytes exceeds limit of {}",
                frame.payload.len(),
                self.max_payload
            )));
        }
        frame.write_to(dst)
    }
}

impl Decoder for CommandCodec {
    type Item = CommandFrame;
    type Error = ClientError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<CommandFrame>> {
        CommandFrame::parse(src, self.max_payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpgclient_protocol::{KeepAliveCmd, SayCmd};

    #[test]
    fn test_decode_across_split_reads() {
        let mut codec = CommandCodec::default();
        let say = CommandFrame::from_command(&SayCmd::say("hello")).unwrap();
        let keepalive = CommandFrame::from_command(&KeepAliveCmd).unwrap();

        let mut wire = BytesMut::new();
        codec.encode(say.clone(), &mut wire).unwrap();
        codec.encode(keepalive.clone(), &mut wire).unwrap();

        let mut src = BytesMut::new();
        let mut decoded = Vec::new();
        for chunk in wire.chunks(3) {
            src.extend_from_slice(chunk);
            while let Some(frame) = codec.decode(&mut src).unwrap() {
                decoded.push(frame);
            }
        }

        assert_eq!(decoded, vec![say, keepalive]);
        assert!(src.is_empty());
    }

    #[test]
    fn test_encode_respects_limit() {
        let mut codec = CommandCodec::new(4);
        let frame = CommandFrame::from_command(&SayCmd::say("too long")).unwrap();
        let mut dst = BytesMut::new();

        assert!(codec.encode(frame, &mut dst).is_err());
        assert!(dst.is_empty());
    }
}
