use alloc::vec::Vec;

use quickcheck_macros::quickcheck;
use rstest::rstest;

use crate::{Span, SpanError};

fn ro(bytes: &[u8]) -> Span<'_, u8> {
    Span::from_slice(bytes)
}

#[rstest]
#[case::first(0, 10)]
#[case::last(4, 50)]
#[case::negative_last(-1, 50)]
#[case::negative_first(-5, 10)]
fn get_normalizes_indices(#[case] index: isize, #[case] expected: u8) {
    let span = ro(&[10, 20, 30, 40, 50]);
    assert_eq!(span.get(index), Ok(expected));
}

#[rstest]
#[case::past_end(5)]
#[case::far_past_end(100)]
#[case::too_negative(-6)]
fn get_rejects_out_of_range(#[case] index: isize) {
    let span = ro(&[10, 20, 30, 40, 50]);
    assert!(matches!(span.get(index), Err(SpanError::OutOfRange { .. })));
}

#[test]
fn get_on_empty_span_fails() {
    let span = ro(&[]);
    assert!(matches!(span.get(0), Err(SpanError::OutOfRange { .. })));
    assert!(matches!(span.get(-1), Err(SpanError::OutOfRange { .. })));
}

#[test]
fn set_writes_through_normalized_index() {
    let mut backing = [1u8, 2, 3];
    let mut span = Span::from_mut_slice(&mut backing);
    span.set(-1, 9).unwrap();
    span.set(0, 7).unwrap();
    assert_eq!(span.as_slice(), &[7, 2, 9]);
}

#[test]
fn mutating_a_read_only_span_fails_and_leaves_storage_unchanged() {
    let backing = [1u8, 2, 3];
    let mut span = ro(&backing);
    assert_eq!(span.set(0, 9), Err(SpanError::ReadOnly));
    assert_eq!(span.reverse_in_place(), Err(SpanError::ReadOnly));
    assert_eq!(span.map_in_place(|b| b + 1), Err(SpanError::ReadOnly));

    let source = ro(&[9u8, 9, 9]);
    let mut target = ro(&backing);
    assert_eq!(source.copy_into(&mut target), Err(SpanError::ReadOnly));
    assert_eq!(source.move_into(&mut target), Err(SpanError::ReadOnly));

    assert_eq!(backing, [1, 2, 3]);
}

#[test]
fn subspan_shares_storage_with_parent() {
    let mut backing = [1u8, 2, 3, 4];
    let parent = Span::from_mut_slice(&mut backing);
    let mut sub = parent.subspan(1, 2).unwrap();
    assert!(!sub.is_read_only());
    sub.set(0, 9).unwrap();
    drop(sub);
    assert_eq!(parent.as_slice(), &[1, 9, 3, 4]);
}

#[test]
fn subspan_inherits_read_only() {
    let span = ro(&[1, 2, 3]);
    let mut sub = span.subspan(0, 2).unwrap();
    assert!(sub.is_read_only());
    assert_eq!(sub.set(0, 9), Err(SpanError::ReadOnly));
}

#[rstest]
#[case::offset_past_end(4, 0)]
#[case::count_past_end(0, 4)]
#[case::end_past_end(2, 2)]
fn subspan_rejects_bad_ranges(#[case] offset: usize, #[case] count: usize) {
    let span = ro(&[1, 2, 3]);
    assert!(matches!(
        span.subspan(offset, count),
        Err(SpanError::OutOfRange { .. })
    ));
}

#[test]
fn full_range_subspan_equals_parent() {
    let span = ro(b"bounded");
    assert_eq!(span.subspan(0, span.len()).unwrap(), span);
    // Empty sub at the very end is legal.
    assert_eq!(span.subspan(span.len(), 0).unwrap().len(), 0);
}

#[test]
fn offset_drops_the_front() {
    let span = ro(&[1, 2, 3, 4]);
    let rest = span.offset(1).unwrap();
    assert_eq!(rest.as_slice(), &[2, 3, 4]);
    assert_eq!(span.offset(4).unwrap().len(), 0);
    assert!(matches!(span.offset(5), Err(SpanError::OutOfRange { .. })));
}

#[test]
fn copy_into_requires_enough_room() {
    let source = ro(&[1, 2, 3]);
    let mut short_backing = [0u8; 2];
    let mut short = Span::from_mut_slice(&mut short_backing);
    assert!(matches!(
        source.copy_into(&mut short),
        Err(SpanError::OutOfRange { .. })
    ));

    let mut backing = [0u8; 4];
    let mut target = Span::from_mut_slice(&mut backing);
    source.copy_into(&mut target).unwrap();
    assert_eq!(target.as_slice(), &[1, 2, 3, 0]);
}

#[test]
fn move_into_is_overlap_safe_forward() {
    let mut backing = [1u8, 2, 3, 4, 5];
    let parent = Span::from_mut_slice(&mut backing);
    let source = parent.subspan(0, 4).unwrap();
    let mut target = parent.subspan(1, 4).unwrap();
    source.move_into(&mut target).unwrap();
    assert_eq!(parent.as_slice(), &[1, 1, 2, 3, 4]);
}

#[test]
fn move_into_is_overlap_safe_backward() {
    let mut backing = [1u8, 2, 3, 4, 5];
    let parent = Span::from_mut_slice(&mut backing);
    let source = parent.subspan(1, 4).unwrap();
    let mut target = parent.subspan(0, 4).unwrap();
    source.move_into(&mut target).unwrap();
    assert_eq!(parent.as_slice(), &[2, 3, 4, 5, 5]);
}

#[rstest]
#[case::even(&[1, 2, 3, 4], &[4, 3, 2, 1])]
#[case::odd(&[1, 2, 3], &[3, 2, 1])]
#[case::single(&[7], &[7])]
#[case::empty(&[], &[])]
fn reverse_in_place(#[case] input: &[u8], #[case] expected: &[u8]) {
    let mut backing: Vec<u8> = input.to_vec();
    let mut span = Span::from_mut_slice(&mut backing);
    span.reverse_in_place().unwrap();
    assert_eq!(span.as_slice(), expected);
}

#[test]
fn map_in_place_transforms_every_element() {
    let mut backing = [1u8, 2, 3];
    let mut span = Span::from_mut_slice(&mut backing);
    span.map_in_place(|b| b * 2).unwrap();
    assert_eq!(span.as_slice(), &[2, 4, 6]);
}

#[test]
fn map_leaves_a_read_only_source_untouched() {
    let span = ro(&[1, 2, 3]);
    let doubled = span.map(|b| b * 2);
    assert_eq!(doubled.as_slice(), &[2, 4, 6]);
    assert!(!doubled.is_read_only());
    assert_eq!(span.as_slice(), &[1, 2, 3]);
}

#[test]
fn zeroed_and_filled_allocate_owned_storage() {
    let zeroes: Span<'static, u8> = Span::zeroed(4);
    assert_eq!(zeroes.as_slice(), &[0, 0, 0, 0]);

    let mut filled = Span::filled(3, 0xabu8);
    assert_eq!(filled.as_slice(), &[0xab, 0xab, 0xab]);
    filled.set(1, 0).unwrap();
    assert_eq!(filled.as_slice(), &[0xab, 0, 0xab]);

    assert!(Span::<u8>::zeroed(0).is_empty());
}

#[test]
fn equality_is_content_based() {
    let borrowed = ro(&[1, 2, 3]);
    let owned = Span::from_vec(alloc::vec![1u8, 2, 3]);
    assert_eq!(borrowed, owned);
    assert_ne!(borrowed, ro(&[1, 2]));
    assert_ne!(borrowed, ro(&[1, 2, 4]));
}

#[test]
fn raw_parts_round_trip() {
    let mut backing = [5u8, 6, 7];
    let span = unsafe { Span::from_raw_parts(backing.as_mut_ptr(), backing.len(), true) };
    assert_eq!(span.get(1), Ok(6));
    assert!(span.is_read_only());
}

#[quickcheck]
fn subspan_elements_match_parent(data: Vec<u8>, offset: usize, count: usize) -> bool {
    let span = Span::from_slice(&data);
    let offset = offset % (data.len() + 1);
    let count = count % (data.len() - offset + 1);
    let sub = span.subspan(offset, count).unwrap();
    sub.len() == count
        && (0..count).all(|i| {
            sub.get(isize::try_from(i).unwrap()) == span.get(isize::try_from(offset + i).unwrap())
        })
}
