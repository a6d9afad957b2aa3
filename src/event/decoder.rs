//! Byte stream to key event decoder
//!
//! An explicit state machine over raw terminal bytes. Escape sequences are
//! bounded: anything that does not complete within [`MAX_SEQUENCE_LEN`]
//! bytes, or that ends in an unknown final byte, is dropped without a trace
//! beyond a debug log.

use super::Key;
use tracing::debug;

/// Longest escape sequence (introducer included) the decoder will buffer
pub const MAX_SEQUENCE_LEN: usize = 8;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    /// Saw ESC, waiting to learn whether a sequence follows
    Escape,
    /// Inside `ESC [`, collecting parameter bytes
    Csi(Vec<u8>),
    /// Saw `ESC O`
    Ss3,
    /// Swallowing the rest of an overlong sequence up to its final byte
    Discard,
    /// Collecting continuation bytes of a multi-byte character
    Utf8 { buf: [u8; 4], len: usize, need: usize },
}

/// Incremental key decoder
///
/// State carries over between calls, so a sequence split across two reads
/// still decodes to one key.
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    state: State,
    vi_navigation: bool,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            vi_navigation: false,
        }
    }

    /// Decode `h`/`j`/`k`/`l` as Left/Down/Up/Right
    pub fn with_vi_navigation(mut self, enabled: bool) -> Self {
        self.vi_navigation = enabled;
        self
    }

    pub fn set_vi_navigation(&mut self, enabled: bool) {
        self.vi_navigation = enabled;
    }

    /// True while a partial sequence (possibly a lone ESC) is buffered
    pub fn is_pending(&self) -> bool {
        self.state != State::Idle
    }

    /// Decode a chunk lazily
    pub fn decode<'a>(&'a mut self, bytes: &'a [u8]) -> impl Iterator<Item = Key> + 'a {
        bytes.iter().filter_map(move |&b| self.feed(b))
    }

    /// Give up waiting on the current sequence
    ///
    /// A lone ESC becomes [`Key::Esc`]; any other partial sequence is dropped.
    pub fn flush(&mut self) -> Option<Key> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Escape => Some(Key::Esc),
            State::Idle => None,
            partial => {
                debug!(?partial, "dropping incomplete input sequence");
                None
            }
        }
    }

    /// Feed one byte, returning a key when one completes
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        if byte == CTRL_C {
            self.state = State::Idle;
            return Some(Key::Interrupt);
        }

        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => self.feed_idle(byte),
            State::Escape => match byte {
                b'[' => {
                    self.state = State::Csi(Vec::with_capacity(MAX_SEQUENCE_LEN));
                    None
                }
                b'O' => {
                    self.state = State::Ss3;
                    None
                }
                ESC => {
                    // First ESC stands alone; the second may start a sequence
                    self.state = State::Escape;
                    Some(Key::Esc)
                }
                other => {
                    debug!(byte = other, "dropping alt-modified key");
                    None
                }
            },
            State::Csi(mut params) => match byte {
                0x20..=0x3f => {
                    // Introducer counts as two bytes of the sequence
                    if params.len() + 3 > MAX_SEQUENCE_LEN {
                        debug!("dropping overlong escape sequence");
                        self.state = State::Discard;
                        return None;
                    }
                    params.push(byte);
                    self.state = State::Csi(params);
                    None
                }
                0x40..=0x7e => {
                    let key = csi_key(&params, byte);
                    if key.is_none() {
                        debug!(final_byte = byte, "dropping unknown escape sequence");
                    }
                    key
                }
                other => {
                    debug!(byte = other, "aborting malformed escape sequence");
                    self.feed_idle(other)
                }
            },
            State::Discard => match byte {
                0x20..=0x3f => {
                    self.state = State::Discard;
                    None
                }
                0x40..=0x7e => None,
                other => self.feed_idle(other),
            },
            State::Ss3 => {
                let key = match byte {
                    b'A' => Some(Key::Up),
                    b'B' => Some(Key::Down),
                    b'C' => Some(Key::Right),
                    b'D' => Some(Key::Left),
                    b'H' => Some(Key::Home),
                    b'F' => Some(Key::End),
                    _ => None,
                };
                if key.is_none() {
                    debug!(byte, "dropping unknown SS3 sequence");
                }
                key
            }
            State::Utf8 { mut buf, len, need } => {
                if !(0x80..=0xbf).contains(&byte) {
                    debug!("dropping truncated UTF-8 character");
                    return self.feed_idle(byte);
                }
                buf[len] = byte;
                let len = len + 1;
                if len < need {
                    self.state = State::Utf8 { buf, len, need };
                    return None;
                }
                match std::str::from_utf8(&buf[..len]).ok().and_then(|s| s.chars().next()) {
                    Some(c) => Some(Key::Char(c)),
                    None => {
                        debug!("dropping invalid UTF-8 character");
                        None
                    }
                }
            }
        }
    }

    fn feed_idle(&mut self, byte: u8) -> Option<Key> {
        match byte {
            ESC => {
                self.state = State::Escape;
                None
            }
            b'\r' | b'\n' => Some(Key::Enter),
            0x7f | 0x08 => Some(Key::Backspace),
            b'\t' => Some(Key::Tab),
            b' ' => Some(Key::Space),
            0x21..=0x7e => Some(self.printable(byte as char)),
            0xc2..=0xdf => self.start_utf8(byte, 2),
            0xe0..=0xef => self.start_utf8(byte, 3),
            0xf0..=0xf4 => self.start_utf8(byte, 4),
            other => {
                debug!(byte = other, "ignoring unbound byte");
                None
            }
        }
    }

    fn start_utf8(&mut self, lead: u8, need: usize) -> Option<Key> {
        let mut buf = [0u8; 4];
        buf[0] = lead;
        self.state = State::Utf8 { buf, len: 1, need };
        None
    }

    fn printable(&self, c: char) -> Key {
        if self.vi_navigation {
            match c {
                'h' => return Key::Left,
                'j' => return Key::Down,
                'k' => return Key::Up,
                'l' => return Key::Right,
                _ => {}
            }
        }
        Key::Char(c)
    }
}

fn csi_key(params: &[u8], final_byte: u8) -> Option<Key> {
    match final_byte {
        b'A' => Some(Key::Up),
        b'B' => Some(Key::Down),
        b'C' => Some(Key::Right),
        b'D' => Some(Key::Left),
        b'H' => Some(Key::Home),
        b'F' => Some(Key::End),
        b'Z' => Some(Key::BackTab),
        b'~' => {
            // Modifier suffix (";5" etc.) does not change which key it is
            let code = params.split(|&b| b == b';').next().unwrap_or(&[]);
            match code {
                b"1" | b"7" => Some(Key::Home),
                b"4" | b"8" => Some(Key::End),
                b"3" => Some(Key::Delete),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(decoder: &mut KeyDecoder, bytes: &[u8]) -> Vec<Key> {
        decoder.decode(bytes).collect()
    }

    #[test]
    fn test_plain_keys() {
        let mut d = KeyDecoder::new();
        assert_eq!(
            decode_all(&mut d, b"a \r\x7f\t"),
            vec![Key::Char('a'), Key::Space, Key::Enter, Key::Backspace, Key::Tab]
        );
    }

    #[test]
    fn test_arrow_sequences() {
        let mut d = KeyDecoder::new();
        assert_eq!(
            decode_all(&mut d, b"\x1b[A\x1b[B\x1b[C\x1b[D\x1bOA"),
            vec![Key::Up, Key::Down, Key::Right, Key::Left, Key::Up]
        );
        assert!(!d.is_pending());
    }

    #[test]
    fn test_tilde_sequences() {
        let mut d = KeyDecoder::new();
        assert_eq!(
            decode_all(&mut d, b"\x1b[3~\x1b[1~\x1b[4~\x1b[Z\x1b[1;5A"),
            vec![Key::Delete, Key::Home, Key::End, Key::BackTab, Key::Up]
        );
    }

    #[test]
    fn test_sequence_split_across_chunks() {
        let mut d = KeyDecoder::new();
        assert!(decode_all(&mut d, b"\x1b").is_empty());
        assert!(d.is_pending());
        assert!(decode_all(&mut d, b"[").is_empty());
        assert_eq!(decode_all(&mut d, b"B"), vec![Key::Down]);
    }

    #[test]
    fn test_lone_escape_flushes_to_esc() {
        let mut d = KeyDecoder::new();
        assert!(decode_all(&mut d, b"\x1b").is_empty());
        assert_eq!(d.flush(), Some(Key::Esc));
        assert!(!d.is_pending());
        assert_eq!(d.flush(), None);
    }

    #[test]
    fn test_double_escape() {
        let mut d = KeyDecoder::new();
        assert_eq!(decode_all(&mut d, b"\x1b\x1b[A"), vec![Key::Esc, Key::Up]);
    }

    #[test]
    fn test_ctrl_c_wins_in_any_state() {
        let mut d = KeyDecoder::new();
        assert_eq!(decode_all(&mut d, b"\x1b[1\x03"), vec![Key::Interrupt]);
        assert!(!d.is_pending());
        assert_eq!(decode_all(&mut d, b"x"), vec![Key::Char('x')]);
    }

    #[test]
    fn test_malformed_sequences_are_dropped() {
        let mut d = KeyDecoder::new();
        // Overlong parameter run, then normal input resumes
        assert_eq!(decode_all(&mut d, b"\x1b[111111111111~x"), vec![Key::Char('x')]);
        // Unknown final byte
        assert_eq!(decode_all(&mut d, b"\x1b[5qy"), vec![Key::Char('y')]);
        // Unknown tilde code
        assert_eq!(decode_all(&mut d, b"\x1b[99~z"), vec![Key::Char('z')]);
        // Alt-modified key
        assert_eq!(decode_all(&mut d, b"\x1bfw"), vec![Key::Char('w')]);
        // A new ESC inside a sequence restarts decoding
        assert_eq!(decode_all(&mut d, b"\x1b[\x1b[A"), vec![Key::Up]);
        // Other control bytes abort the sequence but still count
        assert_eq!(decode_all(&mut d, b"\x1b[1\r"), vec![Key::Enter]);
    }

    #[test]
    fn test_arbitrary_bytes_never_panic() {
        let mut d = KeyDecoder::new();
        let noise: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
        let _ = decode_all(&mut d, &noise);
        let _ = d.flush();
    }

    #[test]
    fn test_utf8() {
        let mut d = KeyDecoder::new();
        let bytes = "é日".as_bytes();
        assert_eq!(decode_all(&mut d, bytes), vec![Key::Char('é'), Key::Char('日')]);
        // Truncated character followed by ASCII keeps the ASCII
        assert_eq!(decode_all(&mut d, &[0xe6, b'a']), vec![Key::Char('a')]);
    }

    #[test]
    fn test_vi_navigation() {
        let mut plain = KeyDecoder::new();
        assert_eq!(decode_all(&mut plain, b"jk"), vec![Key::Char('j'), Key::Char('k')]);

        let mut vi = KeyDecoder::new().with_vi_navigation(true);
        assert_eq!(
            decode_all(&mut vi, b"hjklx"),
            vec![Key::Left, Key::Down, Key::Up, Key::Right, Key::Char('x')]
        );
    }
}
