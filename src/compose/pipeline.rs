/// A unary transformer, the unit the composer works with.
pub type Transform<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// An ordered sequence of transformers applied right-to-left.
///
/// The first stage is the outermost wrapper: for a pipeline `[f, g, h]`,
/// `apply(x)` is `f(g(h(x)))`. An empty pipeline is the identity.
pub struct Pipeline<T> {
    stages: Vec<Transform<T>>,
}

impl<T> Pipeline<T> {
    /// The identity pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage. It becomes the innermost one, closest to the seed.
    pub fn then<F>(mut self, stage: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when [`apply`](Self::apply) returns its seed unchanged.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the seed through every stage, last stage first.
    pub fn apply(&self, seed: T) -> T {
        self.stages
            .iter()
            .rev()
            .fold(seed, |acc, stage| stage(acc))
    }
}

impl<T: 'static> Pipeline<T> {
    /// Collapse the pipeline into a single transformer so it can itself be a
    /// stage of another pipeline.
    pub fn into_transform(self) -> Transform<T> {
        Box::new(move |seed| self.apply(seed))
    }
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<Transform<T>> for Pipeline<T> {
    fn from_iter<I: IntoIterator<Item = Transform<T>>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

/// Compose transformers right-to-left.
///
/// ```
/// use rudder::compose::{compose, Transform};
///
/// let add_one: Transform<i32> = Box::new(|x| x + 1);
/// let double: Transform<i32> = Box::new(|x| x * 2);
///
/// // add_one(double(5))
/// assert_eq!(compose([add_one, double]).apply(5), 11);
/// assert_eq!(compose(Vec::<Transform<i32>>::new()).apply(5), 5);
/// ```
pub fn compose<T, I>(stages: I) -> Pipeline<T>
where
    I: IntoIterator<Item = Transform<T>>,
{
    stages.into_iter().collect()
}
