use anyhow::Result;
use libsql::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_date: Option<String>,
    pub description: Option<String>,
}

/// Validated input for create and full replace. `title` and `author` are
/// guaranteed non-empty by the handler layer.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_date: Option<String>,
    pub description: Option<String>,
}

/// Partial update. Only supplied fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.published_date.is_none()
            && self.description.is_none()
    }
}

pub struct BookStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Book>> {
        let query = r#"
            SELECT id, title, author, published_date, description
            FROM books
            ORDER BY id
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut books = Vec::new();

        while let Some(row) = rows.next().await? {
            books.push(self.row_to_book(&row)?);
        }

        Ok(books)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Book>> {
        let query = r#"
            SELECT id, title, author, published_date, description
            FROM books WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_book(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn create(&self, input: NewBook) -> Result<Book> {
        let query = r#"
            INSERT INTO books (title, author, published_date, description)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, author, published_date, description
        "#;

        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![
                    input.title,
                    input.author,
                    input.published_date,
                    input.description
                ],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(self.row_to_book(&row)?)
        } else {
            anyhow::bail!("Failed to create book")
        }
    }

    /// Full replace: all four mutable columns are overwritten, unsupplied
    /// optional fields become NULL. Returns `None` when `id` matches no row.
    pub async fn replace(&self, id: i64, input: NewBook) -> Result<Option<Book>> {
        if self.get(id).await?.is_none() {
            return Ok(None);
        }

        let query = r#"
            UPDATE books
            SET title = ?, author = ?, published_date = ?, description = ?
            WHERE id = ?
        "#;

        self.conn
            .execute(
                query,
                libsql::params![
                    input.title,
                    input.author,
                    input.published_date,
                    input.description,
                    id
                ],
            )
            .await?;

        self.get(id).await
    }

    /// Writes only the supplied fields, then re-reads the row so the caller
    /// sees the merged state. Returns `None` when `id` matches no row.
    pub async fn patch(&self, id: i64, input: BookPatch) -> Result<Option<Book>> {
        if self.get(id).await?.is_none() {
            return Ok(None);
        }

        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = &input.title {
            updates.push("title = ?");
            params.push(title.clone().into());
        }
        if let Some(author) = &input.author {
            updates.push("author = ?");
            params.push(author.clone().into());
        }
        if let Some(published_date) = &input.published_date {
            updates.push("published_date = ?");
            params.push(published_date.clone().into());
        }
        if let Some(description) = &input.description {
            updates.push("description = ?");
            params.push(description.clone().into());
        }

        if updates.is_empty() {
            return self.get(id).await;
        }

        params.push(id.into());

        let query = format!("UPDATE books SET {} WHERE id = ?", updates.join(", "));

        self.conn.execute(&query, params).await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = self
            .conn
            .execute("DELETE FROM books WHERE id = ?", libsql::params![id])
            .await?;
        Ok(result > 0)
    }

    fn row_to_book(&self, row: &libsql::Row) -> Result<Book> {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            published_date: row.get(3)?,
            description: row.get(4)?,
        })
    }
}
