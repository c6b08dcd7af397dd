//! End-to-end: automaton frames arrive at a loopback "display".

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::net::UdpSocket;
use std::time::Duration;

use cellrain_core::runner::{self, RunBounds};
use cellrain_core::{AutomatonState, ColorMap, Line, PixelSink};
use cellrain_display::{FlaschenCanvas, Offset};
use cellrain_types::{ColorPreset, RulePreset};

fn receiver() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

fn recv_frame(socket: &UdpSocket) -> Vec<u8> {
    let mut buf = vec![0u8; 65_536];
    let len = socket.recv(&mut buf).unwrap();
    buf.truncate(len);
    buf
}

#[test]
fn flush_delivers_one_ppm_datagram() {
    let (display, port) = receiver();
    let mut canvas = FlaschenCanvas::connect("127.0.0.1", port, 3, 2)
        .unwrap()
        .with_offset(Offset::new(1, 2, 11).unwrap());
    canvas
        .set_pixel(0, 2, cellrain_types::Rgb::new(1, 255, 1))
        .unwrap();
    assert_eq!(canvas.peer(), display.local_addr().unwrap());
    canvas.flush().unwrap();

    let frame = recv_frame(&display);
    let mut expected = b"P6\n3 2\n255\n".to_vec();
    expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 1, 255, 1]);
    expected.extend_from_slice(&[0; 9]);
    expected.extend_from_slice(b"\n1\n2\n11\n");
    assert_eq!(frame, expected);
    assert_eq!(canvas.frames_sent(), 1);
}

#[test]
fn automaton_run_streams_frames() {
    let (display, port) = receiver();
    let (width, height) = (7, 4);
    let canvas = FlaschenCanvas::connect("127.0.0.1", port, width, height).unwrap();
    let mut state = AutomatonState::new(
        Line::centered(width).unwrap(),
        RulePreset::Chaotic.into(),
        ColorMap::from_preset(ColorPreset::HighContrast),
        canvas,
    )
    .unwrap();

    let summary = runner::run(&mut state, &RunBounds::frames(2)).unwrap();
    assert_eq!(summary.frames, 2);

    let header_len = b"P6\n7 4\n255\n".len();
    let on = [1u8, 255, 1];
    let off = [80u8, 80, 160];

    let first = recv_frame(&display);
    let second = recv_frame(&display);
    assert_eq!(first.len(), second.len());

    // second frame: row 0 is generation 1 ("..###.."), row 1 the seed
    let row0: Vec<u8> = [off, off, on, on, on, off, off].concat();
    let row1: Vec<u8> = [off, off, off, on, off, off, off].concat();
    let row_bytes = width * 3;
    assert_eq!(&second[header_len..header_len + row_bytes], row0.as_slice());
    assert_eq!(
        &second[header_len + row_bytes..header_len + 2 * row_bytes],
        row1.as_slice()
    );
    // first frame's top row is the seed
    assert_eq!(&first[header_len..header_len + row_bytes], row1.as_slice());
}

#[test]
fn clear_sends_two_blank_frames() {
    let (display, port) = receiver();
    let canvas = FlaschenCanvas::connect("127.0.0.1", port, 2, 2).unwrap();
    let mut state = AutomatonState::new(
        Line::centered(2).unwrap(),
        RulePreset::Triangle.into(),
        ColorMap::from_preset(ColorPreset::HighContrast),
        canvas,
    )
    .unwrap();
    state.render().unwrap();
    runner::clear_display(&mut state).unwrap();

    let blank: Vec<u8> = b"P6\n2 2\n255\n"
        .iter()
        .copied()
        .chain([0u8; 12])
        .chain(b"\n0\n0\n0\n".iter().copied())
        .collect();
    assert_eq!(recv_frame(&display), blank);
    assert_eq!(recv_frame(&display), blank);
    assert_eq!(state.canvas().frames_sent(), 2);
}
