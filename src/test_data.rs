#[cfg(test)]
pub const FEED_DATA: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<feed xmlns='http://www.w3.org/2005/Atom' xmlns:openSearch='http://a9.com/-/spec/opensearchrss/1.0/' xmlns:gd='http://schemas.google.com/g/2005' xmlns:thr='http://purl.org/syndication/thread/1.0' xmlns:app='http://purl.org/atom/app#'>
<id>tag:blogger.com,1999:blog-1.archive</id>
<updated>2021-12-02T10:00:00.000-08:00</updated>
<title type='text'>Some blog</title>
<entry>
  <id>tag:blogger.com,1999:blog-1.settings.BLOG_NAME</id>
  <published>2019-01-01T00:00:00.000-08:00</published>
  <updated>2019-01-01T00:00:00.000-08:00</updated>
  <category scheme='http://schemas.google.com/g/2005#kind' term='http://schemas.google.com/blogger/2008/kind#settings'/>
  <title type='text'>Blog name</title>
  <content type='text'>Some blog</content>
</entry>
<entry>
  <id>tag:blogger.com,1999:blog-1.post-555</id>
  <published>2020-01-05T10:00:00Z</published>
  <updated>2020-01-06T08:30:00Z</updated>
  <category scheme='http://schemas.google.com/g/2005#kind' term='http://schemas.google.com/blogger/2008/kind#post'/>
  <category scheme='http://www.blogger.com/atom/ns#' term='rust'/>
  <category scheme='http://www.blogger.com/atom/ns#' term='blogging'/>
  <title type='text'>Hello "World"</title>
  <content type='html'>&lt;pre class=&quot;highlight-source-js&quot;&gt;console.log(1);&lt;/pre&gt;</content>
  <link rel='replies' type='application/atom+xml' href='http://example.com/feeds/555/comments/default' title='Post Comments'/>
  <link rel='replies' type='text/html' href='http://example.com/2020/01/hello.html#comment-form' title='2 Comments'/>
  <link rel='self' type='application/atom+xml' href='http://www.blogger.com/feeds/1/posts/default/555'/>
  <link rel='alternate' type='text/html' href='http://example.com/2020/01/hello.html' title='Hello "World"'/>
  <author>
    <name>Jane Roe</name>
    <uri>http://example.com/profile</uri>
    <email>noreply@blogger.com</email>
    <gd:image rel='http://schemas.google.com/g/2005#thumbnail' width='16' height='16' src='https://img1.blogblog.com/img/b16-rounded.gif'/>
  </author>
</entry>
<entry>
  <id>tag:blogger.com,1999:blog-1.post-777</id>
  <published>2021-11-30T23:10:00.000-08:00</published>
  <updated>2021-12-01T07:00:00.000-08:00</updated>
  <app:control><app:draft>yes</app:draft></app:control>
  <category scheme='http://schemas.google.com/g/2005#kind' term='http://schemas.google.com/blogger/2008/kind#post'/>
  <title type='text'>Draft: notes on 'pre' blocks</title>
  <author>
    <name>Jane Roe</name>
  </author>
</entry>
<entry>
  <id>tag:blogger.com,1999:blog-1.post-9001</id>
  <published>2020-01-07T12:00:00Z</published>
  <updated>2020-01-07T12:00:00Z</updated>
  <category scheme='http://schemas.google.com/g/2005#kind' term='http://schemas.google.com/blogger/2008/kind#comment'/>
  <title type='text'>Nice post</title>
  <content type='html'>&lt;p&gt;Thanks &lt;b&gt;a lot&lt;/b&gt;!&lt;/p&gt;</content>
  <author>
    <name>Bob</name>
    <uri>http://bob.example.com</uri>
    <email>bob@example.com</email>
  </author>
  <thr:in-reply-to href='http://example.com/2020/01/hello.html' ref='tag:blogger.com,1999:blog-1.post-555' source='http://www.blogger.com/feeds/1/posts/default/555' type='text/html'/>
</entry>
<entry>
  <id>tag:blogger.com,1999:blog-1.post-9002</id>
  <published>2021-12-01T09:00:00Z</published>
  <updated>2021-12-01T09:00:00Z</updated>
  <title type='text'></title>
  <content type='html'>&lt;p&gt;Second&lt;/p&gt;</content>
  <author>
    <name>Anonymous</name>
  </author>
  <thr:in-reply-to ref='tag:blogger.com,1999:blog-1.post-777' source='http://www.blogger.com/feeds/1/posts/default/777' type='text/html'/>
</entry>
<entry>
  <id>tag:blogger.com,1999:blog-1.post-9003</id>
  <published>2020-01-08T12:00:00Z</published>
  <updated>2020-01-08T12:00:00Z</updated>
  <title type='text'>Follow up</title>
  <content type='html'>&lt;p&gt;One more thing&lt;/p&gt;</content>
  <author>
    <name>Carol</name>
    <uri>http://carol.example.com</uri>
    <email>carol@example.com</email>
  </author>
  <thr:in-reply-to ref='tag:blogger.com,1999:blog-1.post-555' source='http://www.blogger.com/feeds/1/posts/default/555' type='text/html'/>
</entry>
</feed>
"#;
