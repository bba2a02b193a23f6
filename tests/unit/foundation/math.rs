use super::*;

#[test]
fn fnv_split_writes_hash_the_same() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"drape");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b'd');
    b.write_bytes(b"rape");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_u64_is_little_endian_bytes() {
    let mut a = Fnv1a64::new_default();
    a.write_u64(0x0102);
    let mut b = Fnv1a64::new_default();
    b.write_bytes(&[2, 1, 0, 0, 0, 0, 0, 0]);
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_treats_signed_zero_as_equal() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(-0.0);
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}
