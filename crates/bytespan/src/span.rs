//! Bounds-checked views over contiguous memory.
//!
//! Overview
//! - [`Span`] is a fixed-length handle to a run of elements: a raw pointer,
//!   a length fixed at construction, and a read-only flag. Every access goes
//!   through a range check, and negative indices count back from the end.
//! - A span either owns its storage (created by [`Span::zeroed`],
//!   [`Span::filled`], [`Span::from_vec`] or [`Span::map`]) or borrows it
//!   (created from a slice, a raw pointer, or by slicing another span).
//!   Dropping a borrowed span never touches the underlying buffer; dropping
//!   an owned span frees it.
//! - Sub-spans alias the parent's storage. A span and everything sliced out
//!   of it form a single exclusion domain: any number of threads may read
//!   concurrently, but a mutation anywhere in the domain requires external
//!   exclusion. The span itself takes no locks.
//!
//! The read-only flag is a runtime property, separate from Rust mutability:
//! a span wrapped around storage that must not be written (for example a
//! buffer handed over by foreign code) rejects every mutating operation with
//! [`SpanError::ReadOnly`] no matter how the handle is held.

use alloc::{boxed::Box, vec::Vec};
use core::{
    fmt,
    marker::PhantomData,
    ptr::{self, NonNull},
    slice,
};

use crate::error::SpanError;

/// A fixed-length, bounds-checked view over contiguous elements of type `T`.
///
/// # Examples
///
/// ```rust
/// use bytespan::Span;
///
/// let mut backing = [1u8, 2, 3, 4];
/// let mut span = Span::from_mut_slice(&mut backing);
/// span.set(-1, 9)?;
/// assert_eq!(span.get(3), Ok(9));
///
/// let head = span.subspan(0, 2)?;
/// assert_eq!(head.len(), 2);
/// # Ok::<(), bytespan::SpanError>(())
/// ```
pub struct Span<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    read_only: bool,
    owned: bool,
    _storage: PhantomData<&'a mut [T]>,
}

// A span is a pointer plus bookkeeping; it is exactly as thread-safe as a
// slice of T, under the caller-side exclusion contract described above.
unsafe impl<T: Send> Send for Span<'_, T> {}
unsafe impl<T: Sync> Sync for Span<'_, T> {}

impl<'a, T> Span<'a, T> {
    /// Wraps an existing slice as a borrowed, read-only span.
    #[must_use]
    pub fn from_slice(slice: &'a [T]) -> Self {
        Self {
            ptr: NonNull::from(slice).cast(),
            len: slice.len(),
            read_only: true,
            owned: false,
            _storage: PhantomData,
        }
    }

    /// Wraps an existing mutable slice as a borrowed, writable span.
    #[must_use]
    pub fn from_mut_slice(slice: &'a mut [T]) -> Self {
        let len = slice.len();
        Self {
            ptr: NonNull::from(slice).cast(),
            len,
            read_only: false,
            owned: false,
            _storage: PhantomData,
        }
    }

    /// Wraps an externally owned pointer/length pair as a borrowed span.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null, aligned, and valid for reads of `len`
    /// elements for the lifetime `'a` (and for writes too unless
    /// `read_only` is set). The storage must not be freed or resized while
    /// the span or any span sliced from it is alive.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize, read_only: bool) -> Self {
        Self {
            // Caller contract: `ptr` is non-null.
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            len,
            read_only,
            owned: false,
            _storage: PhantomData,
        }
    }

    /// Allocates an owned span of `len` default-initialized elements.
    #[must_use]
    pub fn zeroed(len: usize) -> Span<'static, T>
    where
        T: Default,
    {
        Span::from_vec(core::iter::repeat_with(T::default).take(len).collect())
    }

    /// Allocates an owned span of `len` copies of `value`.
    #[must_use]
    pub fn filled(len: usize, value: T) -> Span<'static, T>
    where
        T: Clone,
    {
        Span::from_vec(alloc::vec![value; len])
    }

    /// Adopts a vector's allocation as an owned, writable span.
    #[must_use]
    pub fn from_vec(vec: Vec<T>) -> Span<'static, T> {
        let boxed = vec.into_boxed_slice();
        let len = boxed.len();
        // `Box::into_raw` never returns null.
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(boxed).cast::<T>()) };
        Span {
            ptr,
            len,
            read_only: false,
            owned: true,
            _storage: PhantomData,
        }
    }

    /// Number of elements in the span. Fixed at construction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the span has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the span rejects mutating operations.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Reads the element at `index`.
    ///
    /// A negative index is normalized by adding the length, so `-1` is the
    /// last element. Fails with [`SpanError::OutOfRange`] if the normalized
    /// index is outside `[0, len)`.
    pub fn get(&self, index: isize) -> Result<T, SpanError>
    where
        T: Copy,
    {
        let i = self.normalize(index)?;
        Ok(unsafe { self.ptr.add(i).read() })
    }

    /// Writes `value` at `index`, with the same normalization as [`get`].
    ///
    /// Fails with [`SpanError::ReadOnly`] before anything else if the span
    /// is read-only.
    ///
    /// [`get`]: Span::get
    pub fn set(&mut self, index: isize, value: T) -> Result<(), SpanError>
    where
        T: Copy,
    {
        self.ensure_writable()?;
        let i = self.normalize(index)?;
        unsafe { self.ptr.add(i).write(value) };
        Ok(())
    }

    /// Borrows the sub-range `[offset, offset + count)` as a new span
    /// sharing this span's storage and read-only flag.
    ///
    /// Fails with [`SpanError::OutOfRange`] unless `offset <= len` and
    /// `count <= len - offset`.
    pub fn subspan(&self, offset: usize, count: usize) -> Result<Span<'_, T>, SpanError> {
        let Some(end) = offset.checked_add(count) else {
            return Err(self.out_of_range(usize::MAX));
        };
        if end > self.len {
            return Err(self.out_of_range(end));
        }
        Ok(Span {
            ptr: unsafe { self.ptr.add(offset) },
            len: count,
            read_only: self.read_only,
            owned: false,
            _storage: PhantomData,
        })
    }

    /// Borrows everything from `n` to the end; `subspan(n, len - n)`.
    pub fn offset(&self, n: usize) -> Result<Span<'_, T>, SpanError> {
        if n > self.len {
            return Err(self.out_of_range(n));
        }
        self.subspan(n, self.len - n)
    }

    /// Copies every element into the front of `target`.
    ///
    /// Fails with [`SpanError::ReadOnly`] if `target` is read-only and with
    /// [`SpanError::OutOfRange`] if `target` is shorter than `self`. The two
    /// spans must not overlap; use [`move_into`] for aliased storage.
    ///
    /// [`move_into`]: Span::move_into
    pub fn copy_into(&self, target: &mut Span<'_, T>) -> Result<(), SpanError>
    where
        T: Copy,
    {
        self.check_transfer(target)?;
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), target.ptr.as_ptr(), self.len) };
        Ok(())
    }

    /// Like [`copy_into`], but correct even when source and target share
    /// storage: no source element is clobbered before it has been read.
    ///
    /// [`copy_into`]: Span::copy_into
    pub fn move_into(&self, target: &mut Span<'_, T>) -> Result<(), SpanError>
    where
        T: Copy,
    {
        self.check_transfer(target)?;
        unsafe { ptr::copy(self.ptr.as_ptr(), target.ptr.as_ptr(), self.len) };
        Ok(())
    }

    /// Reverses the elements in place. No-op for `len <= 1`.
    pub fn reverse_in_place(&mut self) -> Result<(), SpanError> {
        self.ensure_writable()?;
        let base = self.ptr.as_ptr();
        let mut i = 0;
        let mut j = self.len;
        while i + 1 < j {
            j -= 1;
            unsafe { ptr::swap(base.add(i), base.add(j)) };
            i += 1;
        }
        Ok(())
    }

    /// Replaces each element with `f(element)`, front to back.
    pub fn map_in_place<F>(&mut self, mut f: F) -> Result<(), SpanError>
    where
        T: Copy,
        F: FnMut(T) -> T,
    {
        self.ensure_writable()?;
        for i in 0..self.len {
            let p = unsafe { self.ptr.add(i) };
            unsafe { p.write(f(p.read())) };
        }
        Ok(())
    }

    /// Returns a new owned span holding `f(element)` for each element.
    /// The source may be read-only.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Span<'static, T>
    where
        T: Copy,
        F: FnMut(T) -> T,
    {
        Span::from_vec(self.as_slice().iter().copied().map(f).collect())
    }

    /// Borrows the whole span as a slice for read access.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Iterates over the elements by reference.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn normalize(&self, index: isize) -> Result<usize, SpanError> {
        // A Rust allocation never exceeds isize::MAX bytes, so the cast is
        // lossless for any constructible span.
        let len = self.len as isize;
        let adjusted = if index < 0 { index + len } else { index };
        if (0..len).contains(&adjusted) {
            Ok(adjusted as usize)
        } else {
            Err(SpanError::OutOfRange {
                index: adjusted,
                len: self.len,
            })
        }
    }

    fn ensure_writable(&self) -> Result<(), SpanError> {
        if self.read_only {
            return Err(SpanError::ReadOnly);
        }
        Ok(())
    }

    fn check_transfer(&self, target: &Span<'_, T>) -> Result<(), SpanError> {
        target.ensure_writable()?;
        if target.len < self.len {
            return Err(target.out_of_range(self.len));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> SpanError {
        SpanError::OutOfRange {
            index: isize::try_from(index).unwrap_or(isize::MAX),
            len: self.len,
        }
    }
}

impl<T> Drop for Span<'_, T> {
    fn drop(&mut self) {
        if self.owned {
            let raw = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len);
            drop(unsafe { Box::from_raw(raw) });
        }
    }
}

/// Element-wise equality: same length and equal content, regardless of
/// which storage backs either span.
impl<T: PartialEq> PartialEq<Span<'_, T>> for Span<'_, T> {
    fn eq(&self, other: &Span<'_, T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Span<'_, T> {}

impl<'s, T> IntoIterator for &'s Span<'_, T> {
    type Item = &'s T;
    type IntoIter = slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Span<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Span")
            .field("len", &self.len)
            .field("read_only", &self.read_only)
            .field("data", &self.as_slice())
            .finish()
    }
}
