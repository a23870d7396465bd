// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// An immutable `(label, weight)` pair, e.g. a player and their skill value.
///
/// Labels are opaque and need not be unique; two items with the same label
/// are still distinct items.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WeightedItem<T> {
    label: String,
    weight: T,
}

impl<T> WeightedItem<T> {
    /// Creates a new item.
    #[inline]
    pub fn new<S>(label: S, weight: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            label: label.into(),
            weight,
        }
    }

    /// Creates an item whose label is the decimal rendering of its weight.
    #[inline]
    pub fn unlabeled(weight: T) -> Self
    where
        T: std::fmt::Display,
    {
        Self {
            label: weight.to_string(),
            weight,
        }
    }

    /// Returns the label of this item.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the weight of this item.
    #[inline]
    pub fn weight(&self) -> T
    where
        T: Copy,
    {
        self.weight
    }
}

impl<S, T> From<(S, T)> for WeightedItem<T>
where
    S: Into<String>,
{
    #[inline]
    fn from((label, weight): (S, T)) -> Self {
        Self::new(label, weight)
    }
}

impl<T> std::fmt::Display for WeightedItem<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.weight)
    }
}
