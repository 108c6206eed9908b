use crate::env::Env;

pub fn install(_env: &mut Env) -> Vec<String> {
    Vec::new()
}

// A persistent queue as a pair of lists: items are taken from the front
// list and put onto the back list; when the front runs dry the back is
// reversed into it.
pub const SOURCE: &str = "
(defn reverse (elements)
  (fold-left (fn (acc item) (cons item acc)) () elements))

(defn new
  \"Returns a new queue containing the given items.

  Examples:
  > (new 1 2 3)
  -> ((1 2 3) ())\"
  (& elements)
  (list elements ()))

(defn put (q item)
  (list (first q) (cons item (second q))))

(defn rebalance (q)
  (if (empty? (first q))
    (list (reverse (second q)) ())
    q))

(defn head (q)
  (first (first (rebalance q))))

(defn tail (q)
  (let ((balanced (rebalance q)))
    (list (rest (first balanced)) (second balanced))))

(export-as queue (new put head tail))
";
