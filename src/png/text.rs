use super::*;

/// `tEXt`: Textual data
///
/// A keyword, a null byte, then the text. Both parts are Latin-1.
///
/// Spec: [tEXt](https://www.w3.org/TR/png/#11tEXt)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct tEXt<'b> {
  keyword: &'b [u8],
  text: &'b [u8],
}
impl<'b> tEXt<'b> {
  /// Makes a text record.
  ///
  /// ## Failure
  /// * The keyword is empty, longer than 79 bytes, or contains a null byte.
  pub fn new(keyword: &'b [u8], text: &'b [u8]) -> Result<Self, ValidationError> {
    if keyword.is_empty() || keyword.len() > 79 {
      return Err(ValidationError::new(ChunkTy::tEXt, "keyword_len", keyword.len() as u32));
    }
    if let Some(i) = keyword.iter().position(|&b| b == 0) {
      return Err(ValidationError::new(ChunkTy::tEXt, "keyword_nul_at", i as u32));
    }
    Ok(Self { keyword, text })
  }

  /// The keyword, 1 to 79 Latin-1 bytes.
  #[inline]
  #[must_use]
  pub const fn keyword(&self) -> &'b [u8] {
    self.keyword
  }

  /// The text, Latin-1.
  #[inline]
  #[must_use]
  pub const fn text(&self) -> &'b [u8] {
    self.text
  }

  /// Makes an owned chunk holding this record.
  #[must_use]
  pub fn to_chunk(&self) -> Chunk {
    let mut data = Vec::with_capacity(self.keyword.len() + 1 + self.text.len());
    data.extend_from_slice(self.keyword);
    data.push(0);
    data.extend_from_slice(self.text);
    Chunk::new(ChunkTy::tEXt, data)
  }
}
impl<'b> TryFrom<&'b [u8]> for tEXt<'b> {
  type Error = ValidationError;
  #[inline]
  fn try_from(value: &'b [u8]) -> Result<Self, Self::Error> {
    let mut it = value.splitn(2, |u| u == &0_u8);
    let keyword = it.next().unwrap_or(&[]);
    let text = it
      .next()
      .ok_or(ValidationError::new(ChunkTy::tEXt, "keyword_len", keyword.len() as u32))?;
    Self::new(keyword, text)
  }
}
impl Debug for tEXt<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // Latin-1 maps byte-for-byte onto the first 256 chars
    struct Latin1<'a>(&'a [u8]);
    impl Debug for Latin1<'_> {
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_char('"')?;
        for ch in self.0.iter().copied().map(char::from) {
          for esc in ch.escape_debug() {
            f.write_char(esc)?;
          }
        }
        f.write_char('"')
      }
    }
    f.debug_struct("tEXt")
      .field("keyword", &Latin1(self.keyword))
      .field("text", &Latin1(self.text))
      .finish()
  }
}
