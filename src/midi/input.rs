//! Hardware MIDI input for the demo application.
//!
//! Uses midir for cross-platform port access and rtrb for lock-free delivery
//! of raw message bytes to the UI thread, where they are fed to
//! [`crate::keyboard::PianoRoll::send`]. The component itself never touches
//! a device; this engine is its external collaborator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use midir::{MidiInput, MidiInputConnection, MidiInputPort};
use rtrb::{Consumer, Producer, RingBuffer};

/// Default buffer size for inbound messages.
pub const DEFAULT_MESSAGE_BUFFER_SIZE: usize = 512;

/// Channel-voice messages are at most three bytes.
const MAX_MESSAGE_LEN: usize = 3;

/// Information about a MIDI input device.
#[derive(Debug, Clone)]
pub struct MidiDeviceInfo {
    /// Human-readable device name.
    pub name: String,
    /// Internal port index.
    pub index: usize,
}

/// Raw bytes of one inbound message, sized for channel-voice traffic.
///
/// Copy so it crosses the ring buffer without allocation on the midir
/// callback thread.
#[derive(Debug, Clone, Copy)]
pub struct RawMidiMessage {
    data: [u8; MAX_MESSAGE_LEN],
    len: u8,
    /// midir timestamp in microseconds since the connection opened.
    pub timestamp_us: u64,
}

impl RawMidiMessage {
    /// Capture a midir callback payload.
    ///
    /// Anything longer than a channel-voice message (SysEx, mostly) is
    /// truncated; the keyboard never reacts to such traffic.
    pub fn from_midir(bytes: &[u8], timestamp_us: u64) -> Self {
        let len = bytes.len().min(MAX_MESSAGE_LEN);
        let mut data = [0u8; MAX_MESSAGE_LEN];
        data[..len].copy_from_slice(&bytes[..len]);
        Self {
            data,
            len: len as u8,
            timestamp_us,
        }
    }

    /// The captured message bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// Timestamp in milliseconds, the unit [`crate::keyboard::PianoRoll::send`]
    /// expects.
    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp_us as f64 / 1000.0
    }
}

/// Error type for MIDI input operations.
#[derive(Debug)]
pub enum MidiInputError {
    /// Failed to initialize the MIDI subsystem.
    InitError(String),
    /// Failed to connect to a device.
    ConnectionError(String),
    /// Device not found.
    DeviceNotFound,
}

impl std::fmt::Display for MidiInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MidiInputError::InitError(s) => write!(f, "MIDI init error: {}", s),
            MidiInputError::ConnectionError(s) => write!(f, "MIDI connection error: {}", s),
            MidiInputError::DeviceNotFound => write!(f, "MIDI device not found"),
        }
    }
}

impl std::error::Error for MidiInputError {}

/// Port list shared with the hot-plug scan thread.
struct PortState {
    ports: Vec<MidiInputPort>,
    port_names: Vec<String>,
}

/// MIDI input engine: port enumeration, connection, raw byte delivery.
pub struct MidiInputEngine {
    /// Cached device list.
    devices: Vec<MidiDeviceInfo>,
    /// Currently connected device index, if any.
    selected_device: Option<usize>,
    /// Active connection handle; closing it detaches the callback.
    connection: Option<MidiInputConnection<()>>,
    /// Producer handed to the connection callback on connect.
    message_producer: Option<Producer<RawMidiMessage>>,
    /// Shared state for device enumeration.
    state: Arc<Mutex<PortState>>,
    /// Flag to signal the scan thread to stop.
    scan_running: Arc<AtomicBool>,
    /// Handle for the device scan thread.
    scan_thread: Option<thread::JoinHandle<()>>,
}

impl MidiInputEngine {
    /// Create a new input engine.
    ///
    /// Returns the engine and the consumer end of the message ring buffer.
    pub fn new() -> Result<(Self, Consumer<RawMidiMessage>), MidiInputError> {
        let (producer, consumer) = RingBuffer::new(DEFAULT_MESSAGE_BUFFER_SIZE);

        let midi_in =
            MidiInput::new("Piano Roll").map_err(|e| MidiInputError::InitError(e.to_string()))?;

        let ports: Vec<MidiInputPort> = midi_in.ports();
        let port_names: Vec<String> = ports
            .iter()
            .map(|p| midi_in.port_name(p).unwrap_or_else(|_| "Unknown".to_string()))
            .collect();

        let devices: Vec<MidiDeviceInfo> = port_names
            .iter()
            .enumerate()
            .map(|(i, name)| MidiDeviceInfo {
                name: name.clone(),
                index: i,
            })
            .collect();

        let state = Arc::new(Mutex::new(PortState { ports, port_names }));

        // Background thread for hot-plug detection
        let scan_running = Arc::new(AtomicBool::new(true));
        let state_clone = Arc::clone(&state);
        let running_clone = Arc::clone(&scan_running);

        let scan_thread = thread::spawn(move || {
            while running_clone.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_secs(2));

                if !running_clone.load(Ordering::Relaxed) {
                    break;
                }

                if let Ok(midi_in) = MidiInput::new("Piano Roll Scanner") {
                    let new_ports: Vec<MidiInputPort> = midi_in.ports();
                    let new_names: Vec<String> = new_ports
                        .iter()
                        .map(|p| {
                            midi_in.port_name(p).unwrap_or_else(|_| "Unknown".to_string())
                        })
                        .collect();

                    if let Ok(mut state) = state_clone.lock() {
                        state.ports = new_ports;
                        state.port_names = new_names;
                    }
                }
            }
        });

        let engine = Self {
            devices,
            selected_device: None,
            connection: None,
            message_producer: Some(producer),
            state,
            scan_running,
            scan_thread: Some(scan_thread),
        };

        Ok((engine, consumer))
    }

    /// Enumerate available input devices, reflecting any hot-plugged ports.
    pub fn enumerate_devices(&mut self) -> Vec<MidiDeviceInfo> {
        if let Ok(state) = self.state.lock() {
            self.devices = state
                .port_names
                .iter()
                .enumerate()
                .map(|(i, name)| MidiDeviceInfo {
                    name: name.clone(),
                    index: i,
                })
                .collect();
        }
        self.devices.clone()
    }

    /// The cached device list without rescanning.
    pub fn devices(&self) -> &[MidiDeviceInfo] {
        &self.devices
    }

    /// Currently connected device index.
    pub fn selected_device(&self) -> Option<usize> {
        self.selected_device
    }

    /// Connect to a device by index.
    ///
    /// The connection callback captures raw bytes and pushes them lossily
    /// into the ring buffer; when the buffer is full the message is dropped.
    pub fn connect(&mut self, device_index: usize) -> Result<(), MidiInputError> {
        self.disconnect();

        let port = {
            let state = self
                .state
                .lock()
                .map_err(|_| MidiInputError::ConnectionError("Failed to lock state".to_string()))?;

            if device_index >= state.ports.len() {
                return Err(MidiInputError::DeviceNotFound);
            }

            state.ports[device_index].clone()
        };

        let midi_in = MidiInput::new("Piano Roll Input")
            .map_err(|e| MidiInputError::InitError(e.to_string()))?;

        let producer = self.message_producer.take().ok_or_else(|| {
            MidiInputError::ConnectionError("Message producer already in use".to_string())
        })?;

        // Only one connection at a time, so the callback owns the producer
        let producer = Arc::new(Mutex::new(producer));

        let connection = midi_in
            .connect(
                &port,
                "Piano Roll Input",
                {
                    let producer = Arc::clone(&producer);
                    move |timestamp_us, data, _| {
                        let message = RawMidiMessage::from_midir(data, timestamp_us);
                        if let Ok(mut prod) = producer.lock() {
                            let _ = prod.push(message);
                        }
                        log::debug!("MIDI in: {:02x?}", message.bytes());
                    }
                },
                (),
            )
            .map_err(|e| MidiInputError::ConnectionError(e.to_string()))?;

        self.connection = Some(connection);
        self.selected_device = Some(device_index);

        log::info!(
            "MIDI connected to device {}: {}",
            device_index,
            self.devices
                .get(device_index)
                .map(|d| d.name.as_str())
                .unwrap_or("Unknown")
        );

        Ok(())
    }

    /// Close the current connection, if any.
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            self.selected_device = None;
            log::info!("MIDI disconnected");
        }
    }

    /// Whether a device is currently connected.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }
}

impl Drop for MidiInputEngine {
    fn drop(&mut self) {
        self.scan_running.store(false, Ordering::Relaxed);
        self.disconnect();
        if let Some(thread) = self.scan_thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_message_captures_bytes() {
        let message = RawMidiMessage::from_midir(&[0x90, 60, 100], 1_500_000);
        assert_eq!(message.bytes(), &[0x90, 60, 100]);
        assert_eq!(message.timestamp_us, 1_500_000);
    }

    #[test]
    fn test_raw_message_short() {
        let message = RawMidiMessage::from_midir(&[0xf8], 0);
        assert_eq!(message.bytes(), &[0xf8]);

        let message = RawMidiMessage::from_midir(&[], 0);
        assert!(message.bytes().is_empty());
    }

    #[test]
    fn test_raw_message_truncates_long_traffic() {
        // SysEx-style payload keeps only the first three bytes
        let message = RawMidiMessage::from_midir(&[0xf0, 1, 2, 3, 4, 0xf7], 0);
        assert_eq!(message.bytes(), &[0xf0, 1, 2]);
    }

    #[test]
    fn test_raw_message_timestamp_ms() {
        let message = RawMidiMessage::from_midir(&[0x90, 60, 100], 2_500_000);
        assert!((message.timestamp_ms() - 2500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_raw_message_is_send_and_copy() {
        fn assert_send<T: Send>() {}
        fn assert_copy<T: Copy>() {}
        assert_send::<RawMidiMessage>();
        assert_copy::<RawMidiMessage>();
    }

    #[test]
    fn test_error_display() {
        let err = MidiInputError::InitError("backend unavailable".to_string());
        assert!(err.to_string().contains("backend unavailable"));
        assert_eq!(MidiInputError::DeviceNotFound.to_string(), "MIDI device not found");
    }
}
