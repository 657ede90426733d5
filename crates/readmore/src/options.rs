bitflags::bitflags! {
    /// Configuration flags for one read episode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use readmore::ReadOptions;
    ///
    /// let options = ReadOptions::SHOW_PROMPT | ReadOptions::COLLECT_ALL_COMMENTS;
    /// assert!(options.shows_prompt());
    /// assert!(options.collects_all_comments());
    /// ```
    ///
    /// # Default
    ///
    /// No flags set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ReadOptions: u8 {
        /// Write the prompt before the first line and continuation dots before
        /// every following line.
        const SHOW_PROMPT = 1 << 0;

        /// Keep reading until a real (non-comment) token has been seen.
        ///
        /// When unset, a line holding nothing but comments completes the
        /// episode on its own, so comments are returned one by one.
        const COLLECT_ALL_COMMENTS = 1 << 1;
    }
}

impl ReadOptions {
    /// Whether [`ReadOptions::SHOW_PROMPT`] is set.
    #[must_use]
    pub const fn shows_prompt(self) -> bool {
        self.contains(Self::SHOW_PROMPT)
    }

    /// Whether [`ReadOptions::COLLECT_ALL_COMMENTS`] is set.
    #[must_use]
    pub const fn collects_all_comments(self) -> bool {
        self.contains(Self::COLLECT_ALL_COMMENTS)
    }
}
