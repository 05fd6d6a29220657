use bit_stream::{BitReader, BitWriter, Codec, Error};

#[test]
fn reject_invalid_width() {
    let mut buf = [0; 16];
    let mut writer = BitWriter::new(&mut buf);
    assert_eq!(writer.try_write(1, 65), Err(Error::InvalidWidth(65)));
    assert_eq!(writer.position(), 0);

    let mut reader = BitReader::new(&buf);
    assert_eq!(reader.try_read(65), Err(Error::InvalidWidth(65)));
    assert_eq!(reader.position(), 0);
}

#[test]
fn reject_oversized_writes() {
    let mut buf = [0; 1];
    let mut writer = BitWriter::new(&mut buf);

    assert_eq!(
        writer.try_write(0x1FF, 9),
        Err(Error::CapacityOverflow {
            required: 9,
            available: 8
        })
    );
    assert!(matches!(
        writer.try_write_unary(8),
        Err(Error::CapacityOverflow { required: 9, .. })
    ));
    assert!(matches!(
        writer.try_write_unary(u64::MAX),
        Err(Error::CapacityOverflow {
            required: u64::MAX,
            ..
        })
    ));
    assert!(writer.try_write_vbyte(300).is_err());
    assert_eq!(writer.position(), 0);

    writer.write(1, 1);
    assert_eq!(
        writer.try_write_vbyte(5),
        Err(Error::CapacityOverflow {
            required: 15,
            available: 7
        })
    );
    assert!(writer.try_write_elias_gamma(2).is_ok());
    assert!(writer.try_write_elias_delta(15).is_err());
    assert_eq!(writer.position(), 4);

    assert_eq!(buf, [0b1011_0000]);
}

#[test]
fn fill_buffer_exactly() -> Result<(), Error> {
    let mut buf = [0; 2];
    let mut writer = BitWriter::new(&mut buf);

    writer.try_write_with(Codec::EliasDelta, 15)?;
    writer.try_write_with(Codec::Unary, 6)?;
    assert_eq!(writer.remaining_bits(), 0);
    assert!(writer.try_write_with(Codec::Fixed(1), 0).is_err());
    writer.try_write_with(Codec::Fixed(0), 0)?;

    let mut reader = BitReader::new(&buf);
    assert_eq!(reader.try_read_with(Codec::EliasDelta)?, 15);
    assert_eq!(reader.try_read_with(Codec::Unary)?, 6);
    assert_eq!(reader.try_read_with(Codec::Fixed(0))?, 0);
    assert!(reader.try_read_with(Codec::Fixed(1)).is_err());

    Ok(())
}

#[test]
fn checked_round_trip() -> Result<(), Error> {
    let values = [0, 1, 100, (1 << 28) - 1, 1 << 63, u64::MAX];

    let mut buf = [0; 512];
    let mut writer = BitWriter::new(&mut buf);
    for value in values {
        writer.try_write_elias_gamma(value)?;
        writer.try_write_elias_delta(value)?;
        writer.try_write_vbyte(value)?;
        writer.try_write(value, 64)?;
    }
    writer.try_write_unary(70)?;
    let end = writer.position();

    let mut reader = BitReader::new(&buf);
    for value in values {
        assert_eq!(reader.try_read_elias_gamma()?, value);
        assert_eq!(reader.try_read_elias_delta()?, value);
        assert_eq!(reader.try_read_vbyte()?, value);
        assert_eq!(reader.try_read(64)?, value);
    }
    assert_eq!(reader.try_read_unary()?, 70);
    assert_eq!(reader.position(), end);

    Ok(())
}

#[test]
fn reject_unterminated_unary() {
    let mut reader = BitReader::new(&[0x00]);
    assert_eq!(
        reader.try_read_unary(),
        Err(Error::OutOfBounds {
            required: 9,
            available: 8
        })
    );
    assert_eq!(reader.position(), 0);

    let mut reader = BitReader::new(&[0x00, 0x01]);
    assert_eq!(reader.try_read_unary(), Ok(15));
    assert_eq!(reader.remaining_bits(), 0);
}

#[test]
fn reject_truncated_codes() {
    let mut reader = BitReader::new(&[0b0001_0100]);
    assert_eq!(reader.try_read_elias_gamma(), Ok(9));

    // Length prefix of 6 with no suffix bits left.
    let mut reader = BitReader::new(&[0b0000_0001]);
    reader.skip(1);
    assert!(matches!(
        reader.try_read_elias_gamma(),
        Err(Error::OutOfBounds { .. })
    ));
    assert_eq!(reader.position(), 1);

    let mut reader = BitReader::new(&[0x80]);
    assert_eq!(
        reader.try_read_vbyte(),
        Err(Error::OutOfBounds {
            required: 8,
            available: 0
        })
    );
    assert_eq!(reader.position(), 0);

    let mut reader = BitReader::new(&[0x00]);
    assert!(reader.try_skip(9).is_err());
    assert_eq!(reader.try_skip(8), Ok(()));
}

#[test]
fn reject_malformed_codes() {
    // 65 leading zeros make for a length prefix no writer produces.
    let mut data = [0; 18];
    data[8] = 0b0100_0000;
    let mut reader = BitReader::new(&data);
    assert_eq!(
        reader.try_read_elias_gamma(),
        Err(Error::Malformed("length prefix exceeds 64 bits"))
    );
    assert_eq!(reader.position(), 0);

    // A 64-bit suffix only decodes for `u64::MAX`.
    let mut data = [0; 17];
    data[8] = 0b1000_0000;
    data[16] = 0b1000_0000;
    let mut reader = BitReader::new(&data);
    assert!(matches!(
        reader.try_read_elias_gamma(),
        Err(Error::Malformed(_))
    ));

    let mut reader = BitReader::new(&[0xFF; 11]);
    assert_eq!(
        reader.try_read_vbyte(),
        Err(Error::Malformed("vbyte code overflows 64 bits"))
    );

    let mut data = [0x80; 11];
    data[10] = 0x00;
    let mut reader = BitReader::new(&data);
    assert_eq!(
        reader.try_read_vbyte(),
        Err(Error::Malformed("vbyte code exceeds 10 bytes"))
    );
    assert_eq!(reader.position(), 0);
}
