use bit_stream::{
    utils::{bits, bytes, bytes_for_bits},
    BitReader, BitWriter,
};

#[test]
fn bits_for_values() {
    assert_eq!(bits(0b0), 1);
    assert_eq!(bits(0b1), 1);
    assert_eq!(bits(0b10), 2);
    assert_eq!(bits(0b11), 2);
    assert_eq!(bits(0b100), 3);
    assert_eq!(bits(1 << 63), 64);
    assert_eq!(bits((1 << 63) - 1), 63);
    assert_eq!(bits(u64::MAX), 64);
}

#[test]
fn bits_match_log2() {
    for shift in 0..u64::BITS {
        let value = 1u64 << shift;
        assert_eq!(bits(value), value.ilog2() + 1);
        assert_eq!(bits(value | (value - 1)), shift + 1);
    }
}

#[test]
fn bytes_for_values() {
    assert_eq!(bytes(0), 1);
    assert_eq!(bytes(255), 1);
    assert_eq!(bytes(256), 2);
    assert_eq!(bytes(65535), 2);
    assert_eq!(bytes(65536), 3);
    assert_eq!(bytes(u64::MAX), 8);
}

#[test]
fn bytes_for_bit_counts() {
    assert_eq!(bytes_for_bits(0), 1);
    assert_eq!(bytes_for_bits(1), 1);
    assert_eq!(bytes_for_bits(8), 1);
    assert_eq!(bytes_for_bits(9), 2);
    assert_eq!(bytes_for_bits(101), 13);
}

#[test]
fn bytes_size_single_fields() {
    for value in [0, 100, 255, 256, 65535, 65536, u64::MAX] {
        let mut buf = vec![0; bytes(value)];

        let mut writer = BitWriter::new(&mut buf);
        writer.write(value, bits(value));
        assert!(writer.remaining_bits() < 8);

        let mut reader = BitReader::new(&buf);
        assert_eq!(reader.read(bits(value)), value);
    }
}
